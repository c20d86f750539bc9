use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::deal::{Deal, DealStage, NewDeal, UpdateDeal};
use crate::domain::lookup::LookupRef;
use crate::domain::types::{ContactId, DealId, TypeConstraintError};
use crate::models::Table;
use crate::models::coerce::{self, patch_text};

/// Descriptor of the `deal_c` table.
pub struct DealTable;

impl Table for DealTable {
    const NAME: &'static str = "deal_c";
    const SINGULAR: &'static str = "deal";
    const PLURAL: &'static str = "deals";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "title_c",
        "description_c",
        "value_c",
        "stage_c",
        "probability_c",
        "expected_close_date_c",
        "contactId_c",
        "CreatedOn",
    ];
    const UPDATEABLE_FIELDS: &'static [&'static str] = &[
        "title_c",
        "description_c",
        "value_c",
        "stage_c",
        "probability_c",
        "expected_close_date_c",
        "contactId_c",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["title_c"];
    const CATEGORY_FIELD: Option<&'static str> = Some("stage_c");
    const CONTACT_FIELD: Option<&'static str> = Some("contactId_c");
    const DEFAULT_SORT: &'static str = "Id";

    type Row = DealRow;
    type Record = Deal;
    type Write = DealRecord;
}

#[derive(Debug, Default, Deserialize)]
/// Read shape of a `deal_c` row.
pub struct DealRow {
    #[serde(rename = "Id", default, deserialize_with = "coerce::row_id")]
    pub id: Option<i32>,
    #[serde(rename = "title_c", default, deserialize_with = "coerce::text")]
    pub title: String,
    #[serde(rename = "description_c", default, deserialize_with = "coerce::text")]
    pub description: String,
    #[serde(rename = "value_c", default, deserialize_with = "coerce::number")]
    pub value: f64,
    #[serde(rename = "stage_c", default, deserialize_with = "coerce::text")]
    pub stage: String,
    #[serde(rename = "probability_c", default, deserialize_with = "coerce::integer")]
    pub probability: i32,
    #[serde(
        rename = "expected_close_date_c",
        default,
        deserialize_with = "coerce::date"
    )]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(rename = "contactId_c", default, deserialize_with = "coerce::lookup")]
    pub contact: Option<LookupRef>,
    #[serde(rename = "CreatedOn", default, deserialize_with = "coerce::timestamp")]
    pub created_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, PartialEq)]
/// Write shape of a `deal_c` row.
pub struct DealRecord {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "title_c", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "description_c", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(rename = "value_c", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(rename = "stage_c", skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(rename = "probability_c", skip_serializing_if = "Option::is_none")]
    pub probability: Option<i32>,
    #[serde(
        rename = "expected_close_date_c",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_close_date: Option<NaiveDate>,
    #[serde(rename = "contactId_c", skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i32>,
}

impl TryFrom<DealRow> for Deal {
    type Error = TypeConstraintError;

    fn try_from(row: DealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DealId::new(row.id.unwrap_or_default())?,
            title: row.title,
            description: row.description,
            contact_id: row
                .contact
                .as_ref()
                .and_then(|lookup| ContactId::new(lookup.id()).ok()),
            contact_name: row
                .contact
                .as_ref()
                .and_then(LookupRef::display_name)
                .map(str::to_string),
            value: row.value,
            stage: DealStage::from(row.stage),
            probability: row.probability,
            expected_close_date: row.expected_close_date,
            created_at: row.created_on,
        })
    }
}

impl From<&NewDeal> for DealRecord {
    fn from(deal: &NewDeal) -> Self {
        Self {
            id: None,
            title: Some(deal.title.to_string()),
            description: patch_text(deal.description.as_ref()).flatten().map(Some),
            value: Some(deal.value),
            stage: Some(deal.stage.to_string()),
            probability: deal.probability.map(|p| p.get()),
            expected_close_date: deal.expected_close_date,
            contact_id: deal.contact_id.map(ContactId::get),
        }
    }
}

impl From<(DealId, &UpdateDeal)> for DealRecord {
    fn from((id, updates): (DealId, &UpdateDeal)) -> Self {
        Self {
            id: Some(id.get()),
            title: updates.title.as_ref().map(ToString::to_string),
            description: patch_text(updates.description.as_ref()),
            value: updates.value,
            stage: updates.stage.as_ref().map(ToString::to_string),
            probability: updates.probability.map(|p| p.get()),
            expected_close_date: updates.expected_close_date,
            contact_id: updates.contact_id.map(ContactId::get),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::{DealTitle, Probability};
    use crate::models::unwritable_columns;

    #[test]
    fn write_records_stay_within_updateable_columns() {
        let full = DealRecord {
            id: Some(1),
            title: Some("Renewal".to_string()),
            description: Some(Some("Yearly".to_string())),
            value: Some(10.0),
            stage: Some("Proposal".to_string()),
            probability: Some(50),
            expected_close_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            contact_id: Some(7),
        };

        assert!(unwritable_columns::<DealTable>(&full).is_empty());
    }

    #[test]
    fn create_record_matches_backend_shape() {
        let deal = NewDeal {
            value: 1200.0,
            stage: DealStage::Prospecting,
            contact_id: Some(ContactId::new(7).unwrap()),
            ..NewDeal::new(DealTitle::new("Acme Renewal").unwrap())
        };

        let record = serde_json::to_value(DealRecord::from(&deal)).unwrap();
        let object = record.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert!(!object.contains_key("Id"));
        assert_eq!(record["title_c"], json!("Acme Renewal"));
        assert_eq!(record["value_c"].as_f64(), Some(1200.0));
        assert_eq!(record["stage_c"], json!("Prospecting"));
        assert_eq!(record["contactId_c"], json!(7));
    }

    #[test]
    fn lookup_is_normalized_for_both_shapes() {
        let bare: DealRow =
            serde_json::from_value(json!({"Id": 1, "contactId_c": 7})).unwrap();
        let expanded: DealRow = serde_json::from_value(
            json!({"Id": 2, "contactId_c": {"Id": 7, "Name": "Jane Roe"}}),
        )
        .unwrap();

        let bare = Deal::try_from(bare).unwrap();
        let expanded = Deal::try_from(expanded).unwrap();

        assert_eq!(bare.contact_id, ContactId::new(7).ok());
        assert_eq!(bare.contact_name, None);
        assert_eq!(expanded.contact_id, ContactId::new(7).ok());
        assert_eq!(expanded.contact_name.as_deref(), Some("Jane Roe"));
    }

    #[test]
    fn numeric_columns_are_coerced() {
        let row: DealRow = serde_json::from_value(json!({
            "Id": 3,
            "value_c": "42.5",
            "probability_c": "60",
        }))
        .unwrap();
        let deal = Deal::try_from(row).unwrap();

        assert_eq!(deal.value, 42.5);
        assert_eq!(deal.probability, 60);
        assert_eq!(deal.weighted_value(), 25.5);

        let row: DealRow =
            serde_json::from_value(json!({"Id": 4, "value_c": "lots"})).unwrap();
        let deal = Deal::try_from(row).unwrap();
        assert_eq!(deal.value, 0.0);
        assert_eq!(deal.probability, 0);
        assert_eq!(deal.stage, DealStage::Prospecting);
    }

    #[test]
    fn partial_update_writes_only_supplied_columns() {
        let updates = UpdateDeal {
            stage: Some(DealStage::Negotiation),
            probability: Some(Probability::new(80).unwrap()),
            ..UpdateDeal::default()
        };

        let record =
            serde_json::to_value(DealRecord::from((DealId::new(5).unwrap(), &updates))).unwrap();

        assert_eq!(
            record,
            json!({"Id": 5, "stage_c": "Negotiation", "probability_c": 80})
        );
    }

    #[test]
    fn row_round_trip_restores_supplied_fields() {
        let deal = NewDeal {
            description: Some("Three year renewal".to_string()),
            value: 1500.25,
            stage: DealStage::ClosedWon,
            probability: Some(Probability::new(100).unwrap()),
            expected_close_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            contact_id: Some(ContactId::new(2).unwrap()),
            ..NewDeal::new(DealTitle::new("Renewal").unwrap())
        };
        let mut written = serde_json::to_value(DealRecord::from(&deal)).unwrap();
        written["Id"] = json!(10);

        let row: DealRow = serde_json::from_value(written).unwrap();
        let restored = Deal::try_from(row).unwrap();

        assert_eq!(restored.title, "Renewal");
        assert_eq!(restored.description, "Three year renewal");
        assert_eq!(restored.value, 1500.25);
        assert_eq!(restored.stage, DealStage::ClosedWon);
        assert_eq!(restored.probability, 100);
        assert_eq!(restored.expected_close_date, deal.expected_close_date);
        assert_eq!(restored.contact_id, deal.contact_id);
    }
}
