use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::activity::{Activity, ActivityType, NewActivity, UpdateActivity};
use crate::domain::lookup::LookupRef;
use crate::domain::types::{ActivityDescription, ActivityId, ContactId, TypeConstraintError};
use crate::models::Table;
use crate::models::coerce;

/// Characters of the description kept in the synthetic `Name` column.
pub const NAME_DESCRIPTION_CHARS: usize = 50;

/// Descriptor of the `activity_c` table.
pub struct ActivityTable;

impl Table for ActivityTable {
    const NAME: &'static str = "activity_c";
    const SINGULAR: &'static str = "activity";
    const PLURAL: &'static str = "activities";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "Name",
        "contact_id_c",
        "type_c",
        "description_c",
        "created_at_c",
        "CreatedOn",
    ];
    const UPDATEABLE_FIELDS: &'static [&'static str] = &[
        "Name",
        "contact_id_c",
        "type_c",
        "description_c",
        "created_at_c",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["description_c"];
    const CATEGORY_FIELD: Option<&'static str> = Some("type_c");
    const CONTACT_FIELD: Option<&'static str> = Some("contact_id_c");
    const DEFAULT_SORT: &'static str = "Id";

    type Row = ActivityRow;
    type Record = Activity;
    type Write = ActivityRecord;
}

#[derive(Debug, Default, Deserialize)]
/// Read shape of an `activity_c` row.
pub struct ActivityRow {
    #[serde(rename = "Id", default, deserialize_with = "coerce::row_id")]
    pub id: Option<i32>,
    #[serde(rename = "contact_id_c", default, deserialize_with = "coerce::lookup")]
    pub contact: Option<LookupRef>,
    #[serde(rename = "type_c", default, deserialize_with = "coerce::text")]
    pub activity_type: String,
    #[serde(rename = "description_c", default, deserialize_with = "coerce::text")]
    pub description: String,
    #[serde(rename = "created_at_c", default, deserialize_with = "coerce::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "CreatedOn", default, deserialize_with = "coerce::timestamp")]
    pub created_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
/// Write shape of an `activity_c` row.
pub struct ActivityRecord {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "contact_id_c", skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i32>,
    #[serde(rename = "type_c", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(rename = "description_c", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "created_at_c", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Synthetic display name: type followed by the start of the description.
pub fn activity_name(activity_type: &str, description: &ActivityDescription) -> String {
    format!(
        "{activity_type} - {}",
        description.prefix(NAME_DESCRIPTION_CHARS)
    )
}

impl TryFrom<ActivityRow> for Activity {
    type Error = TypeConstraintError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActivityId::new(row.id.unwrap_or_default())?,
            contact_id: row
                .contact
                .as_ref()
                .and_then(|lookup| ContactId::new(lookup.id()).ok()),
            contact_name: row
                .contact
                .as_ref()
                .and_then(LookupRef::display_name)
                .map(str::to_string),
            activity_type: ActivityType::from(row.activity_type),
            description: row.description,
            created_at: row.created_at.or(row.created_on),
        })
    }
}

impl From<&NewActivity> for ActivityRecord {
    fn from(activity: &NewActivity) -> Self {
        Self {
            id: None,
            name: Some(activity_name(
                activity.activity_type.as_str(),
                &activity.description,
            )),
            contact_id: Some(activity.contact_id.get()),
            activity_type: Some(activity.activity_type.to_string()),
            description: Some(activity.description.as_str().to_string()),
            created_at: Some(activity.created_at),
        }
    }
}

impl From<(ActivityId, &UpdateActivity)> for ActivityRecord {
    fn from((id, updates): (ActivityId, &UpdateActivity)) -> Self {
        let name = updates.description.as_ref().map(|description| {
            let activity_type = updates
                .activity_type
                .as_ref()
                .map_or("activity", ActivityType::as_str);
            activity_name(activity_type, description)
        });

        Self {
            id: Some(id.get()),
            name,
            contact_id: updates.contact_id.map(ContactId::get),
            activity_type: updates.activity_type.as_ref().map(ToString::to_string),
            description: updates
                .description
                .as_ref()
                .map(|description| description.as_str().to_string()),
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::models::unwritable_columns;

    fn description(text: &str) -> ActivityDescription {
        ActivityDescription::new(text).unwrap()
    }

    #[test]
    fn create_record_truncates_name_to_prefix() {
        let long = "x".repeat(80);
        let activity = NewActivity {
            created_at: Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
            ..NewActivity::new(
                ContactId::new(7).unwrap(),
                ActivityType::Email,
                description(&long),
            )
        };

        let record = serde_json::to_value(ActivityRecord::from(&activity)).unwrap();

        assert_eq!(record["Name"], json!(format!("email - {}", "x".repeat(50))));
        assert_eq!(record["contact_id_c"], json!(7));
        assert_eq!(record["type_c"], json!("email"));
        assert_eq!(record["description_c"], json!(long));
        assert_eq!(record["created_at_c"], json!("2024-07-01T12:00:00Z"));
    }

    #[test]
    fn write_records_stay_within_updateable_columns() {
        let full = ActivityRecord {
            id: Some(1),
            name: Some("call - Intro".to_string()),
            contact_id: Some(7),
            activity_type: Some("call".to_string()),
            description: Some("Intro".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()),
        };

        assert!(unwritable_columns::<ActivityTable>(&full).is_empty());
    }

    #[test]
    fn name_prefix_keeps_plain_text_symbols() {
        let activity = NewActivity::new(
            ContactId::new(7).unwrap(),
            ActivityType::Meeting,
            description("R&D sync: budget < 5k"),
        );

        let record = ActivityRecord::from(&activity);

        assert_eq!(record.name.as_deref(), Some("meeting - R&D sync: budget < 5k"));
        assert_eq!(record.description.as_deref(), Some("R&D sync: budget < 5k"));
    }

    #[test]
    fn update_without_description_keeps_name() {
        let updates = UpdateActivity {
            activity_type: Some(ActivityType::Meeting),
            ..UpdateActivity::default()
        };

        let record =
            serde_json::to_value(ActivityRecord::from((ActivityId::new(2).unwrap(), &updates)))
                .unwrap();

        assert_eq!(record, json!({"Id": 2, "type_c": "meeting"}));
    }

    #[test]
    fn update_with_description_only_uses_generic_prefix() {
        let updates = UpdateActivity {
            description: Some(description("Follow-up sent")),
            ..UpdateActivity::default()
        };

        let record =
            serde_json::to_value(ActivityRecord::from((ActivityId::new(2).unwrap(), &updates)))
                .unwrap();

        assert_eq!(record["Name"], json!("activity - Follow-up sent"));
        assert!(record.get("type_c").is_none());
    }

    #[test]
    fn missing_type_defaults_to_call() {
        let row: ActivityRow = serde_json::from_value(json!({
            "Id": 8,
            "contact_id_c": {"Id": 3, "Name": "Jane Roe"},
            "CreatedOn": "2024-01-01T00:00:00Z",
        }))
        .unwrap();

        let activity = Activity::try_from(row).unwrap();

        assert_eq!(activity.activity_type, ActivityType::Call);
        assert_eq!(activity.description, "");
        assert_eq!(activity.contact_id, ContactId::new(3).ok());
        assert_eq!(activity.contact_name.as_deref(), Some("Jane Roe"));
        assert!(activity.created_at.is_some());
    }
}
