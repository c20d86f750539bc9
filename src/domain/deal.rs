use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContactId, DealId, DealTitle, Probability, token_enum};

token_enum!(
    /// Named stage of the sales pipeline.
    DealStage, default = Prospecting,
    {
        Prospecting => "Prospecting",
        Qualification => "Qualification",
        Proposal => "Proposal",
        Negotiation => "Negotiation",
        ClosedWon => "Closed Won",
        ClosedLost => "Closed Lost",
    }
);

impl DealStage {
    /// Stages in pipeline order.
    pub fn pipeline() -> [DealStage; 6] {
        [
            DealStage::Prospecting,
            DealStage::Qualification,
            DealStage::Proposal,
            DealStage::Negotiation,
            DealStage::ClosedWon,
            DealStage::ClosedLost,
        ]
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DealStage::ClosedWon | DealStage::ClosedLost)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(rename = "Id")]
    pub id: DealId,
    pub title: String,
    pub description: String,
    pub contact_id: Option<ContactId>,
    /// Display name of the referenced contact when the backend expanded it.
    pub contact_name: Option<String>,
    pub value: f64,
    pub stage: DealStage,
    pub probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Deal {
    /// Deal value weighted by its win probability.
    pub fn weighted_value(&self) -> f64 {
        self.value * f64::from(self.probability.clamp(0, 100)) / 100.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDeal {
    pub title: DealTitle,
    pub description: Option<String>,
    pub contact_id: Option<ContactId>,
    pub value: f64,
    pub stage: DealStage,
    pub probability: Option<Probability>,
    pub expected_close_date: Option<NaiveDate>,
}

impl NewDeal {
    /// Creates a deal in the first pipeline stage with no value.
    #[must_use]
    pub fn new(title: DealTitle) -> Self {
        Self {
            title,
            description: None,
            contact_id: None,
            value: 0.0,
            stage: DealStage::default(),
            probability: None,
            expected_close_date: None,
        }
    }
}

/// Partial update of a deal. `None` leaves the column untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateDeal {
    pub title: Option<DealTitle>,
    pub description: Option<String>,
    pub contact_id: Option<ContactId>,
    pub value: Option<f64>,
    pub stage: Option<DealStage>,
    pub probability: Option<Probability>,
    pub expected_close_date: Option<NaiveDate>,
}

impl UpdateDeal {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
