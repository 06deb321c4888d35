// emsx/src/schemas/mod.rs
pub mod form_schema;
