//! Form definitions accepted by the JSON API.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidateEmail, ValidateUrl, ValidationError, ValidationErrors};

use crate::domain::types::TypeConstraintError;

pub mod activity;
pub mod company;
pub mod contact;
pub mod deal;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Company name is required")]
    CompanyNameRequired,

    #[error("First name is required")]
    FirstNameRequired,

    #[error("Deal title is required")]
    DealTitleRequired,

    #[error("Description is required")]
    DescriptionRequired,

    #[error("invalid id")]
    InvalidId,

    #[error("Probability must be between 0 and 100")]
    InvalidProbability,

    #[error("invalid date, expected YYYY-MM-DD")]
    InvalidDate,

    #[error("Nothing to update")]
    EmptyUpdate,

    #[error("No records selected")]
    NoIds,
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::NonPositiveId => FormError::InvalidId,
            TypeConstraintError::OutOfRange { .. } => FormError::InvalidProbability,
            TypeConstraintError::EmptyString | TypeConstraintError::InvalidValue(_) => {
                FormError::DescriptionRequired
            }
        }
    }
}

/// Accepts blank values; anything else must be an email address.
pub(crate) fn email_or_blank(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// Accepts blank values; anything else must be a URL.
pub(crate) fn url_or_blank(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

/// Parses an optional `YYYY-MM-DD` date; blank is no date.
pub(crate) fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, FormError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FormError::InvalidDate),
        None => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Reads an optional number sent either as a JSON number or as a numeric
/// string. Null and blank strings are no value.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumberOrText::Number(number)) => number,
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map_err(|_| D::Error::custom(format!("expected a number, got \"{text}\"")))?
        }
    };
    if number.is_finite() {
        Ok(Some(number))
    } else {
        Err(D::Error::custom("expected a finite number"))
    }
}

/// Like [`lenient_f64`] but the value must be a whole `i32`.
pub(crate) fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match lenient_f64(deserializer)? {
        None => Ok(None),
        Some(number)
            if number.fract() == 0.0
                && number >= f64::from(i32::MIN)
                && number <= f64::from(i32::MAX) =>
        {
            Ok(Some(number as i32))
        }
        Some(number) => Err(D::Error::custom(format!(
            "expected a whole number, got {number}"
        ))),
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Batch of record ids selected for deletion.
pub struct DeleteForm {
    #[validate(length(min = 1))]
    pub ids: Vec<i32>,
}

impl DeleteForm {
    /// Validates the selection and converts it into typed ids.
    pub fn into_ids<T>(self) -> Result<Vec<T>, FormError>
    where
        T: TryFrom<i32, Error = TypeConstraintError>,
    {
        if self.ids.is_empty() {
            return Err(FormError::NoIds);
        }
        self.validate()?;
        self.ids
            .into_iter()
            .map(|id| T::try_from(id).map_err(FormError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DealId;

    #[test]
    fn blank_optional_values_pass_format_checks() {
        assert!(email_or_blank("  ").is_ok());
        assert!(email_or_blank("sales@acme.test").is_ok());
        assert!(email_or_blank("not an email").is_err());
        assert!(url_or_blank("").is_ok());
        assert!(url_or_blank("https://acme.test").is_ok());
        assert!(url_or_blank("acme").is_err());
    }

    #[test]
    fn dates_parse_or_fail_loudly() {
        assert_eq!(parse_date(None).unwrap(), None);
        assert_eq!(parse_date(Some(" ")).unwrap(), None);
        assert_eq!(
            parse_date(Some("2025-06-30")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30)
        );
        assert!(matches!(
            parse_date(Some("30/06/2025")),
            Err(FormError::InvalidDate)
        ));
    }

    #[derive(Debug, Deserialize)]
    struct Amounts {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: Option<f64>,
        #[serde(default, deserialize_with = "lenient_i32")]
        share: Option<i32>,
    }

    fn amounts(body: serde_json::Value) -> Result<Amounts, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let parsed = amounts(serde_json::json!({"value": " 1200.50 ", "share": "80"})).unwrap();
        assert_eq!(parsed.value, Some(1200.5));
        assert_eq!(parsed.share, Some(80));

        let parsed = amounts(serde_json::json!({"value": 7, "share": 40.0})).unwrap();
        assert_eq!(parsed.value, Some(7.0));
        assert_eq!(parsed.share, Some(40));

        let parsed = amounts(serde_json::json!({"value": "", "share": null})).unwrap();
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.share, None);

        let parsed = amounts(serde_json::json!({})).unwrap();
        assert_eq!(parsed.value, None);
    }

    #[test]
    fn unparseable_numbers_are_rejected() {
        let err = amounts(serde_json::json!({"value": "twelve"})).unwrap_err();
        assert!(err.to_string().contains("expected a number"), "{err}");

        assert!(amounts(serde_json::json!({"share": "12.5"})).is_err());
        assert!(amounts(serde_json::json!({"value": "NaN"})).is_err());
        assert!(amounts(serde_json::json!({"value": true})).is_err());
    }

    #[test]
    fn delete_form_rejects_empty_and_invalid_ids() {
        let empty = DeleteForm { ids: vec![] };
        assert!(matches!(empty.into_ids::<DealId>(), Err(FormError::NoIds)));

        let invalid = DeleteForm { ids: vec![1, 0] };
        assert!(matches!(
            invalid.into_ids::<DealId>(),
            Err(FormError::InvalidId)
        ));

        let ok = DeleteForm { ids: vec![3, 4] };
        let ids = ok.into_ids::<DealId>().unwrap();
        assert_eq!(ids.iter().map(|id| id.get()).collect::<Vec<_>>(), vec![3, 4]);
    }
}
