use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::contact::{Contact, ContactStatus, NewContact, UpdateContact, compose_full_name};
use crate::domain::types::{ContactId, TypeConstraintError};
use crate::models::Table;
use crate::models::coerce::{self, patch_text};

/// Descriptor of the `contact_c` table.
pub struct ContactTable;

impl Table for ContactTable {
    const NAME: &'static str = "contact_c";
    const SINGULAR: &'static str = "contact";
    const PLURAL: &'static str = "contacts";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "Name",
        "first_name_c",
        "last_name_c",
        "email_c",
        "phone_c",
        "company_c",
        "status_c",
        "created_at_c",
        "last_activity_c",
        "CreatedOn",
        "ModifiedOn",
    ];
    const UPDATEABLE_FIELDS: &'static [&'static str] = &[
        "Name",
        "first_name_c",
        "last_name_c",
        "email_c",
        "phone_c",
        "company_c",
        "status_c",
        "created_at_c",
        "last_activity_c",
    ];
    const SEARCH_FIELDS: &'static [&'static str] =
        &["first_name_c", "last_name_c", "email_c", "company_c"];
    const CATEGORY_FIELD: Option<&'static str> = Some("status_c");
    const CONTACT_FIELD: Option<&'static str> = None;
    const DEFAULT_SORT: &'static str = "Id";

    type Row = ContactRow;
    type Record = Contact;
    type Write = ContactRecord;
}

#[derive(Debug, Default, Deserialize)]
/// Read shape of a `contact_c` row.
pub struct ContactRow {
    #[serde(rename = "Id", default, deserialize_with = "coerce::row_id")]
    pub id: Option<i32>,
    #[serde(rename = "first_name_c", default, deserialize_with = "coerce::text")]
    pub first_name: String,
    #[serde(rename = "last_name_c", default, deserialize_with = "coerce::text")]
    pub last_name: String,
    #[serde(rename = "email_c", default, deserialize_with = "coerce::text")]
    pub email: String,
    #[serde(rename = "phone_c", default, deserialize_with = "coerce::text")]
    pub phone: String,
    #[serde(rename = "company_c", default, deserialize_with = "coerce::text")]
    pub company: String,
    #[serde(rename = "status_c", default, deserialize_with = "coerce::text")]
    pub status: String,
    #[serde(rename = "created_at_c", default, deserialize_with = "coerce::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "last_activity_c", default, deserialize_with = "coerce::timestamp")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(rename = "CreatedOn", default, deserialize_with = "coerce::timestamp")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(rename = "ModifiedOn", default, deserialize_with = "coerce::timestamp")]
    pub modified_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
/// Write shape of a `contact_c` row.
pub struct ContactRecord {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "first_name_c", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "last_name_c", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "email_c", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(rename = "phone_c", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(rename = "company_c", skip_serializing_if = "Option::is_none")]
    pub company: Option<Option<String>>,
    #[serde(rename = "status_c", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "created_at_c", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "last_activity_c", skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = TypeConstraintError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::new(row.id.unwrap_or_default())?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            status: ContactStatus::from(row.status),
            created_at: row.created_at.or(row.created_on),
            last_activity: row.last_activity.or(row.modified_on),
        })
    }
}

impl From<&NewContact> for ContactRecord {
    fn from(contact: &NewContact) -> Self {
        Self {
            id: None,
            name: Some(compose_full_name(&contact.first_name, &contact.last_name)),
            first_name: Some(contact.first_name.clone()),
            last_name: Some(contact.last_name.clone()),
            email: contact.email.clone().map(Some),
            phone: contact.phone.clone().map(Some),
            company: contact.company.clone().map(Some),
            status: Some(contact.status.to_string()),
            created_at: Some(contact.created_at),
            last_activity: Some(contact.created_at),
        }
    }
}

impl From<(ContactId, &UpdateContact)> for ContactRecord {
    fn from((id, updates): (ContactId, &UpdateContact)) -> Self {
        let first_name = updates.first_name.as_ref().map(|s| s.trim().to_string());
        let last_name = updates.last_name.as_ref().map(|s| s.trim().to_string());
        // The synthetic name can only be rebuilt when both parts are known.
        let name = match (&first_name, &last_name) {
            (Some(first), Some(last)) => Some(compose_full_name(first, last)),
            _ => None,
        };

        Self {
            id: Some(id.get()),
            name,
            first_name,
            last_name,
            email: patch_text(updates.email.as_ref())
                .map(|email| email.map(|s| s.to_lowercase())),
            phone: patch_text(updates.phone.as_ref()),
            company: patch_text(updates.company.as_ref()),
            status: updates.status.as_ref().map(ToString::to_string),
            created_at: None,
            last_activity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::models::unwritable_columns;

    fn sample_new() -> NewContact {
        NewContact {
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            ..NewContact::new(
                "Jane".to_string(),
                "Roe".to_string(),
                Some("jane@roe.test".to_string()),
                None,
                Some("Acme".to_string()),
                ContactStatus::Lead,
            )
        }
    }

    #[test]
    fn create_record_composes_name_and_stamps_timestamps() {
        let record = serde_json::to_value(ContactRecord::from(&sample_new())).unwrap();

        assert_eq!(
            record,
            json!({
                "Name": "Jane Roe",
                "first_name_c": "Jane",
                "last_name_c": "Roe",
                "email_c": "jane@roe.test",
                "company_c": "Acme",
                "status_c": "lead",
                "created_at_c": "2024-05-01T09:00:00Z",
                "last_activity_c": "2024-05-01T09:00:00Z",
            })
        );
    }

    #[test]
    fn write_records_stay_within_updateable_columns() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let text = || Some(Some("x".to_string()));
        let full = ContactRecord {
            id: Some(1),
            name: Some("Jane Roe".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Roe".to_string()),
            email: text(),
            phone: text(),
            company: text(),
            status: Some("lead".to_string()),
            created_at: Some(now),
            last_activity: Some(now),
        };

        assert!(unwritable_columns::<ContactTable>(&full).is_empty());
        assert!(unwritable_columns::<ContactTable>(&ContactRecord::from(&sample_new())).is_empty());
    }

    #[test]
    fn status_only_update_writes_id_and_status() {
        let id = ContactId::new(12).unwrap();
        let updates = UpdateContact::status(ContactStatus::Customer);

        let record = serde_json::to_value(ContactRecord::from((id, &updates))).unwrap();

        assert_eq!(record, json!({"Id": 12, "status_c": "customer"}));
    }

    #[test]
    fn name_is_rebuilt_only_with_both_parts() {
        let id = ContactId::new(3).unwrap();
        let first_only = UpdateContact {
            first_name: Some("Janet".to_string()),
            ..UpdateContact::default()
        };
        let both = UpdateContact {
            first_name: Some("Janet".to_string()),
            last_name: Some("Doe".to_string()),
            ..UpdateContact::default()
        };

        let first_only = serde_json::to_value(ContactRecord::from((id, &first_only))).unwrap();
        let both = serde_json::to_value(ContactRecord::from((id, &both))).unwrap();

        assert_eq!(first_only, json!({"Id": 3, "first_name_c": "Janet"}));
        assert_eq!(both["Name"], json!("Janet Doe"));
    }

    #[test]
    fn row_round_trip_restores_supplied_fields() {
        let new = sample_new();
        let mut written = serde_json::to_value(ContactRecord::from(&new)).unwrap();
        written["Id"] = json!(44);

        let row: ContactRow = serde_json::from_value(written).unwrap();
        let contact = Contact::try_from(row).unwrap();

        assert_eq!(contact.id.get(), 44);
        assert_eq!(contact.full_name(), "Jane Roe");
        assert_eq!(contact.email, "jane@roe.test");
        assert_eq!(contact.company, "Acme");
        assert_eq!(contact.status, ContactStatus::Lead);
        assert_eq!(contact.created_at, Some(new.created_at));
        assert_eq!(contact.last_activity, Some(new.created_at));
    }

    #[test]
    fn missing_columns_fall_back_to_defaults_and_system_timestamps() {
        let row: ContactRow = serde_json::from_value(json!({
            "Id": 5,
            "first_name_c": "Sam",
            "CreatedOn": "2024-01-02T03:04:05Z",
            "ModifiedOn": "2024-02-02T03:04:05Z",
        }))
        .unwrap();

        let contact = Contact::try_from(row).unwrap();

        assert_eq!(contact.last_name, "");
        assert_eq!(contact.status, ContactStatus::Lead);
        assert_eq!(
            contact.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        );
        assert_eq!(
            contact.last_activity,
            Some(Utc.with_ymd_and_hms(2024, 2, 2, 3, 4, 5).unwrap())
        );
    }
}
