use serde::Deserialize;
use validator::Validate;

use crate::domain::deal::{DealStage, NewDeal, UpdateDeal};
use crate::domain::types::{ContactId, DealTitle, Probability};
use crate::forms::{FormError, lenient_f64, lenient_i32, parse_date};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for adding a deal.
pub struct AddDealForm {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub contact_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(range(min = 0.0))]
    pub value: Option<f64>,
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    #[validate(range(min = 0, max = 100))]
    pub probability: Option<i32>,
    pub expected_close_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for editing a deal.
pub struct SaveDealForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub contact_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(range(min = 0.0))]
    pub value: Option<f64>,
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "lenient_i32")]
    #[validate(range(min = 0, max = 100))]
    pub probability: Option<i32>,
    pub expected_close_date: Option<String>,
}

fn probability(value: Option<i32>) -> Result<Option<Probability>, FormError> {
    value
        .map(Probability::new)
        .transpose()
        .map_err(|_| FormError::InvalidProbability)
}

fn contact_id(value: Option<i32>) -> Result<Option<ContactId>, FormError> {
    value
        .map(ContactId::new)
        .transpose()
        .map_err(|_| FormError::InvalidId)
}

impl TryFrom<AddDealForm> for NewDeal {
    type Error = FormError;

    fn try_from(form: AddDealForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let title = DealTitle::new(form.title).map_err(|_| FormError::DealTitleRequired)?;

        Ok(NewDeal {
            description: form.description,
            contact_id: contact_id(form.contact_id)?,
            value: form.value.unwrap_or_default(),
            stage: form
                .stage
                .as_deref()
                .map(DealStage::from)
                .unwrap_or_default(),
            probability: probability(form.probability)?,
            expected_close_date: parse_date(form.expected_close_date.as_deref())?,
            ..NewDeal::new(title)
        })
    }
}

impl TryFrom<SaveDealForm> for UpdateDeal {
    type Error = FormError;

    fn try_from(form: SaveDealForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let title = form
            .title
            .map(DealTitle::new)
            .transpose()
            .map_err(|_| FormError::DealTitleRequired)?;

        let updates = UpdateDeal {
            title,
            description: form.description,
            contact_id: contact_id(form.contact_id)?,
            value: form.value,
            stage: form.stage.as_deref().map(DealStage::from),
            probability: probability(form.probability)?,
            expected_close_date: parse_date(form.expected_close_date.as_deref())?,
        };
        if updates.is_empty() {
            return Err(FormError::EmptyUpdate);
        }
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn add_form_builds_new_deal() {
        let form: AddDealForm = serde_json::from_value(json!({
            "title": "Acme Renewal",
            "value": 1200,
            "stage": "prospecting",
            "contactId": 7,
            "expectedCloseDate": "2025-06-30",
        }))
        .unwrap();

        let deal = NewDeal::try_from(form).unwrap();

        assert_eq!(deal.title.as_str(), "Acme Renewal");
        assert_eq!(deal.value, 1200.0);
        assert_eq!(deal.stage, DealStage::Prospecting);
        assert_eq!(deal.contact_id, ContactId::new(7).ok());
        assert_eq!(deal.expected_close_date, NaiveDate::from_ymd_opt(2025, 6, 30));
        assert_eq!(deal.probability, None);
    }

    #[test]
    fn add_form_reads_value_sent_as_text() {
        let form: AddDealForm = serde_json::from_value(json!({
            "title": "Acme Renewal",
            "value": "1200",
            "stage": "Prospecting",
            "contactId": 7,
        }))
        .unwrap();

        let deal = NewDeal::try_from(form).unwrap();
        assert_eq!(deal.value, 1200.0);
        assert_eq!(deal.stage, DealStage::Prospecting);
    }

    #[test]
    fn save_form_reads_probability_sent_as_text() {
        let form: SaveDealForm =
            serde_json::from_value(json!({"value": "950.25", "probability": "60"})).unwrap();

        let updates = UpdateDeal::try_from(form).unwrap();
        assert_eq!(updates.value, Some(950.25));
        assert_eq!(updates.probability, Probability::new(60).ok());
    }

    #[test]
    fn text_that_is_not_a_number_is_rejected() {
        let parsed = serde_json::from_value::<AddDealForm>(json!({
            "title": "Acme Renewal",
            "value": "a lot",
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn add_form_requires_title() {
        let form = AddDealForm {
            title: "  ".to_string(),
            ..AddDealForm::default()
        };
        assert!(matches!(
            NewDeal::try_from(form),
            Err(FormError::DealTitleRequired)
        ));
    }

    #[test]
    fn probability_outside_range_is_rejected() {
        let form = AddDealForm {
            title: "Renewal".to_string(),
            probability: Some(120),
            ..AddDealForm::default()
        };
        assert!(matches!(
            NewDeal::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn save_form_with_stage_only() {
        let form = SaveDealForm {
            stage: Some("Closed Won".to_string()),
            ..SaveDealForm::default()
        };

        let updates = UpdateDeal::try_from(form).unwrap();
        assert_eq!(updates.stage, Some(DealStage::ClosedWon));
        assert_eq!(updates.title, None);
    }
}
