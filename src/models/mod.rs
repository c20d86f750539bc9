//! Backend table descriptors and row shapes.
//!
//! Every entity has a `*Row` (read shape, lenient) converted into the domain
//! record, and a `*Record` (write shape) built from the domain `New*` /
//! `Update*` values. Write records only carry updateable columns and skip
//! every column the caller did not supply.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::types::TypeConstraintError;

pub mod activity;
pub mod coerce;
pub mod company;
#[cfg(feature = "server")]
pub mod config;
pub mod contact;
pub mod deal;

/// Static description of a backend table.
pub trait Table {
    /// Table name in the backend.
    const NAME: &'static str;
    /// Singular noun used in user-facing notices.
    const SINGULAR: &'static str;
    /// Plural noun used in user-facing notices.
    const PLURAL: &'static str;
    /// Columns requested on every read.
    const FIELDS: &'static [&'static str];
    /// Columns create and update calls are permitted to write.
    const UPDATEABLE_FIELDS: &'static [&'static str];
    /// Columns matched by a free-text search.
    const SEARCH_FIELDS: &'static [&'static str];
    /// Column constrained by the categorical filter, if any.
    const CATEGORY_FIELD: Option<&'static str>;
    /// Lookup column referencing a contact, if any.
    const CONTACT_FIELD: Option<&'static str>;
    /// Column used for the default ascending sort.
    const DEFAULT_SORT: &'static str;

    type Row: DeserializeOwned;
    type Record: TryFrom<Self::Row, Error = TypeConstraintError>;
    /// Write shape sent on create and update.
    type Write: Serialize;

    /// Whether a write may carry `column`. `Id` addresses the record on
    /// update and is always accepted.
    fn is_writable(column: &str) -> bool {
        column == "Id" || Self::UPDATEABLE_FIELDS.contains(&column)
    }
}

/// Columns of a serialized write record that `T` does not accept.
#[cfg(test)]
pub(crate) fn unwritable_columns<T: Table>(record: &T::Write) -> Vec<String> {
    let value = serde_json::to_value(record).unwrap();
    value
        .as_object()
        .unwrap()
        .keys()
        .filter(|column| !T::is_writable(column))
        .cloned()
        .collect()
}
