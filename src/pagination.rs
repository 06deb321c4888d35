// emsx/src/pagination.rs
use serde::Serialize;

use crate::filters::ListQuery;

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn paginate(items: Vec<T>, query: &ListQuery) -> Self {
        let total = items.len() as u64;
        let data = items
            .into_iter()
            .skip(query.skip())
            .take(usize::try_from(query.per_page).unwrap_or(usize::MAX))
            .collect();

        Self {
            data,
            total,
            page: query.page,
            per_page: query.per_page,
        }
    }
}
