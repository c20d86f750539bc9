//! CRUD adapter over the remote record client.
//!
//! Reader and writer traits describe what services may ask of the backend.
//! [`RemoteRepository`] implements all of them by building filter
//! descriptors, calling the injected [`crate::remote::RecordClient`] and
//! turning failures into notices plus a sentinel value.

use serde::Deserialize;

use crate::domain::activity::{Activity, NewActivity, UpdateActivity};
use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::deal::{Deal, NewDeal, UpdateDeal};
use crate::domain::types::{ActivityId, CompanyId, ContactId, DealId};
use crate::remote::params::SortDirection;

pub mod activity;
pub mod company;
pub mod contact;
pub mod deal;
pub mod errors;
pub mod query;
pub mod remote;
#[cfg(test)]
pub(crate) mod stub;

pub use remote::RemoteRepository;

/// How per-record outcomes of a batch delete settle the overall result.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// At least one record was deleted.
    #[default]
    Any,
    /// Every requested record was deleted.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// List request shared by every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub contact_id: Option<ContactId>,
    pub sort: Option<(String, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Categorical filter; `all` or a blank value disables it.
    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    /// Restricts the list to rows referencing the given contact.
    pub fn contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((field.into(), direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[allow(async_fn_in_trait)]
pub trait CompanyReader {
    async fn get_company_by_id(&self, id: CompanyId) -> Option<Company>;
    async fn list_companies(&self, query: ListQuery) -> (usize, Vec<Company>);
}

#[allow(async_fn_in_trait)]
pub trait CompanyWriter {
    async fn create_company(&self, company: &NewCompany) -> Option<Company>;
    async fn update_company(&self, id: CompanyId, updates: &UpdateCompany) -> Option<Company>;
    async fn delete_companies(&self, ids: &[CompanyId]) -> bool;
}

#[allow(async_fn_in_trait)]
pub trait ContactReader {
    async fn get_contact_by_id(&self, id: ContactId) -> Option<Contact>;
    async fn list_contacts(&self, query: ListQuery) -> (usize, Vec<Contact>);
}

#[allow(async_fn_in_trait)]
pub trait ContactWriter {
    async fn create_contact(&self, contact: &NewContact) -> Option<Contact>;
    async fn update_contact(&self, id: ContactId, updates: &UpdateContact) -> Option<Contact>;
    async fn delete_contacts(&self, ids: &[ContactId]) -> bool;
}

#[allow(async_fn_in_trait)]
pub trait DealReader {
    async fn get_deal_by_id(&self, id: DealId) -> Option<Deal>;
    async fn list_deals(&self, query: ListQuery) -> (usize, Vec<Deal>);
}

#[allow(async_fn_in_trait)]
pub trait DealWriter {
    async fn create_deal(&self, deal: &NewDeal) -> Option<Deal>;
    async fn update_deal(&self, id: DealId, updates: &UpdateDeal) -> Option<Deal>;
    async fn delete_deals(&self, ids: &[DealId]) -> bool;
}

#[allow(async_fn_in_trait)]
pub trait ActivityReader {
    async fn get_activity_by_id(&self, id: ActivityId) -> Option<Activity>;
    async fn list_activities(&self, query: ListQuery) -> (usize, Vec<Activity>);
}

#[allow(async_fn_in_trait)]
pub trait ActivityWriter {
    async fn create_activity(&self, activity: &NewActivity) -> Option<Activity>;
    async fn update_activity(&self, id: ActivityId, updates: &UpdateActivity)
    -> Option<Activity>;
    async fn delete_activities(&self, ids: &[ActivityId]) -> bool;
}
