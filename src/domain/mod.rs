//! Domain records in the shape the CRM front end works with.

pub mod activity;
pub mod company;
pub mod contact;
pub mod deal;
pub mod lookup;
pub mod types;

/// Trims the value and drops it when nothing is left.
pub(crate) fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
