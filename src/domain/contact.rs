use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::normalize_text;
use crate::domain::types::{ContactId, token_enum};

token_enum!(
    /// Lifecycle status of a contact.
    ContactStatus, default = Lead,
    {
        Lead => "lead",
        Prospect => "prospect",
        Customer => "customer",
        Inactive => "inactive",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "Id")]
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: ContactStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        compose_full_name(&self.first_name, &self.last_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: ContactStatus,
    /// Instant stamped into the creation and last-activity columns.
    pub created_at: DateTime<Utc>,
}

impl NewContact {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: Option<String>,
        phone: Option<String>,
        company: Option<String>,
        status: ContactStatus,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: normalize_text(email).map(|s| s.to_lowercase()),
            phone: normalize_text(phone),
            company: normalize_text(company),
            status,
            created_at: Utc::now(),
        }
    }
}

/// Partial update of a contact. `None` leaves the column untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateContact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<ContactStatus>,
}

impl UpdateContact {
    /// Update touching only the status column.
    pub fn status(status: ContactStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Joins first and last name with a single space, skipping blanks.
pub fn compose_full_name(first_name: &str, last_name: &str) -> String {
    [first_name.trim(), last_name.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
