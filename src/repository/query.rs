//! Translation of [`ListQuery`] into backend filter descriptors.

use serde_json::{Value, json};

use crate::models::Table;
use crate::remote::params::{
    FetchParams, Operator, OrderBy, PagingInfo, SortDirection, WhereClause, WhereGroup,
};
use crate::repository::ListQuery;

/// Category value that disables the categorical filter.
pub const ALL_CATEGORIES: &str = "all";

impl ListQuery {
    /// Builds the fetch descriptor for table `T`.
    pub fn to_params<T: Table>(&self) -> FetchParams {
        let mut params = FetchParams::with_fields(T::FIELDS);

        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = Value::String(term.to_string());
            match T::SEARCH_FIELDS {
                [] => {}
                [field] => params
                    .conditions
                    .push(WhereClause::new(*field, Operator::Contains, term)),
                fields => params
                    .where_groups
                    .push(WhereGroup::any_of(fields, Operator::Contains, term)),
            }
        }

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES));
        if let (Some(field), Some(value)) = (T::CATEGORY_FIELD, category) {
            params
                .conditions
                .push(WhereClause::new(field, Operator::EqualTo, json!(value)));
        }

        if let Some(contact_id) = self.contact_id {
            match T::CONTACT_FIELD {
                Some(field) => params.conditions.push(WhereClause::new(
                    field,
                    Operator::EqualTo,
                    json!(contact_id.get()),
                )),
                None => log::warn!("{} cannot be filtered by contact", T::PLURAL),
            }
        }

        let (field, direction) = match &self.sort {
            Some((field, direction)) => (field.clone(), *direction),
            None => (T::DEFAULT_SORT.to_string(), SortDirection::Asc),
        };
        params.order_by.push(OrderBy {
            field_name: field,
            sorttype: direction,
        });

        if let Some(pagination) = &self.pagination {
            let skipped_pages = pagination.page.saturating_sub(1);
            params.paging_info = Some(PagingInfo {
                limit: pagination.per_page,
                offset: skipped_pages.saturating_mul(pagination.per_page),
            });
        }

        params
    }
}
