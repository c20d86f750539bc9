//! DTOs exposed by the CRM API endpoints.

use serde::{Deserialize, Serialize};

use crate::notifications::Notice;
use crate::pagination::Paginated;

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Optional free-form search string applied to the list.
    pub search: Option<String>,
    /// Optional categorical filter (status, stage or type); `all` disables it.
    pub category: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Result payload of the list services.
#[derive(Debug, Serialize)]
pub struct ListPage<T> {
    #[serde(flatten)]
    pub records: Paginated<T>,
    /// Search term echoed back to the caller.
    pub search: Option<String>,
    /// Category filter echoed back to the caller.
    pub category: Option<String>,
}

/// Body of every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub notices: Vec<Notice>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: Option<T>, notices: Vec<Notice>) -> Self {
        Self { data, notices }
    }
}
