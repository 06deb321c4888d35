// emsx/src/schemas/form_schema.rs
use std::str::FromStr;

use convert_case::{Case, Casing};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, RootSchema, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{
    employee::Employee, project::Project, review::PerformanceReview, user::User, work_log::WorkLog,
};
use crate::utils::rbac::{has_permission, Action, Resource};

const READONLY_KEYS: &[&str] = &["id", "createdAt", "updatedAt"];

/// Field struct used to render create/edit dialogs
#[derive(Debug, Serialize, PartialEq)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub field_type: String,           // e.g., "text", "select", "date"
    pub options: Option<Vec<String>>, // for enums or dropdowns
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEntity {
    Employee,
    Project,
    Review,
    WorkLog,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form entity: {0}")]
pub struct UnknownFormEntity(pub String);

impl FromStr for FormEntity {
    type Err = UnknownFormEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" | "employees" => Ok(FormEntity::Employee),
            "project" | "projects" => Ok(FormEntity::Project),
            "review" | "reviews" => Ok(FormEntity::Review),
            "worklog" | "work-log" | "work-logs" => Ok(FormEntity::WorkLog),
            _ => Err(UnknownFormEntity(s.to_string())),
        }
    }
}

impl FormEntity {
    pub fn title(&self) -> &'static str {
        match self {
            FormEntity::Employee => "Employee",
            FormEntity::Project => "Project",
            FormEntity::Review => "Performance Review",
            FormEntity::WorkLog => "Work Log",
        }
    }

    pub fn create_action(&self) -> Action {
        match self {
            FormEntity::Employee => Action::EmployeeCreate,
            FormEntity::Project => Action::ProjectCreate,
            FormEntity::Review => Action::ReviewCreate,
            FormEntity::WorkLog => Action::WorkLogCreate,
        }
    }

    /// Whether the create dialog should be offered to `user`. A work log is
    /// checked as the user's own entry.
    pub fn creatable_by(&self, user: &User) -> bool {
        match self {
            FormEntity::WorkLog => {
                let draft = WorkLog {
                    employee_id: user.id.clone(),
                    ..Default::default()
                };
                has_permission(user, self.create_action(), Some(Resource::WorkLog(&draft)))
            }
            _ => has_permission(user, self.create_action(), None),
        }
    }

    pub fn fields(&self) -> Vec<Field> {
        match self {
            FormEntity::Employee => generate_fields_from_model::<Employee>(),
            FormEntity::Project => generate_fields_from_model::<Project>(),
            FormEntity::Review => generate_fields_from_model::<PerformanceReview>(),
            FormEntity::WorkLog => generate_fields_from_model::<WorkLog>(),
        }
    }
}

// Follows `$ref` and single-element `allOf` wrappers down to the schema
// that actually describes the field.
fn resolve<'a>(schema: &'a Schema, root: &'a RootSchema) -> Option<&'a SchemaObject> {
    let Schema::Object(obj) = schema else {
        return None;
    };
    if let Some(reference) = &obj.reference {
        let name = reference.trim_start_matches("#/definitions/");
        return root.definitions.get(name).and_then(|def| resolve(def, root));
    }
    if let Some(all_of) = obj.subschemas.as_ref().and_then(|s| s.all_of.as_ref()) {
        if let [only] = all_of.as_slice() {
            return resolve(only, root);
        }
    }
    Some(obj)
}

/// Detect field type from schema definition
fn detect_field_type(obj: &SchemaObject) -> (String, Option<Vec<String>>) {
    if let Some(enum_values) = &obj.enum_values {
        let options = enum_values
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect::<Vec<String>>();
        return ("select".to_string(), Some(options));
    }

    if let Some(instance_types) = &obj.instance_type {
        if instance_types.contains(&InstanceType::Integer) || instance_types.contains(&InstanceType::Number) {
            return ("number".to_string(), None);
        }
        if instance_types.contains(&InstanceType::Boolean) {
            return ("checkbox".to_string(), None);
        }
        if instance_types.contains(&InstanceType::Array) {
            return ("list".to_string(), None);
        }
        if instance_types.contains(&InstanceType::Object) {
            return ("group".to_string(), None);
        }
        if instance_types.contains(&InstanceType::String) {
            match obj.format.as_deref() {
                Some("date") => return ("date".to_string(), None),
                Some("date-time") => return ("datetime".to_string(), None),
                _ => {}
            }
        }
    }

    ("text".to_string(), None)
}

/// Generate Field metadata from any model, skipping read-only keys
pub fn generate_fields_from_model<T: JsonSchema>() -> Vec<Field> {
    let gen = SchemaGenerator::default();
    let root: RootSchema = gen.into_root_schema_for::<T>();

    let props = match &root.schema.object {
        Some(obj) => &obj.properties,
        None => return vec![],
    };

    props
        .iter()
        .filter(|(name, _)| !READONLY_KEYS.contains(&name.as_str()))
        .map(|(name, schema)| {
            let (field_type, options) = resolve(schema, &root)
                .map(detect_field_type)
                .unwrap_or_else(|| ("text".to_string(), None));

            Field {
                name: name.clone(),
                label: name.to_case(Case::Title),
                field_type,
                options,
            }
        })
        .collect()
}

/// Grouped form structure for a create dialog
pub fn form_structure_for(entity: FormEntity) -> Value {
    serde_json::json!({
        "title": format!("Create {}", entity.title()),
        "action": entity.create_action(),
        "groups": [
            {
                "title": "Details",
                "fields": entity.fields()
            }
        ]
    })
}
