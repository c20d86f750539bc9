//! Intents behind the CRM pages.
//!
//! Services are generic over the repository traits and a [`Notifier`]. They
//! turn the adapter's sentinels into [`ServiceError`]s and raise the success
//! notices of completed mutations.
//!
//! [`Notifier`]: crate::notifications::Notifier

use crate::dto::api::{ListPage, ListParams};
use crate::pagination::Paginated;
use crate::repository::ListQuery;

pub mod activities;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod errors;
pub mod reports;

pub use errors::{ServiceError, ServiceResult};

/// Builds the repository query behind a list page.
pub(crate) fn list_query(params: &ListParams, per_page: usize) -> ListQuery {
    let mut query = ListQuery::new().paginate(params.page.unwrap_or(1), per_page);
    if let Some(search) = params.search.as_deref() {
        query = query.search(search);
    }
    if let Some(category) = params.category.as_deref() {
        query = query.category(category);
    }
    query
}

pub(crate) fn list_page<T>(
    params: ListParams,
    per_page: usize,
    (total, items): (usize, Vec<T>),
) -> ListPage<T> {
    ListPage {
        records: Paginated::from_total(items, params.page.unwrap_or(1), per_page, total),
        search: params.search,
        category: params.category,
    }
}
