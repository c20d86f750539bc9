use serde::Deserialize;
use validator::Validate;

use crate::domain::company::{NewCompany, UpdateCompany};
use crate::domain::types::CompanyName;
use crate::forms::{FormError, email_or_blank, url_or_blank};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for adding a company.
pub struct AddCompanyForm {
    #[serde(default)]
    pub company_name: String,
    pub industry: Option<String>,
    #[validate(custom(function = "url_or_blank"))]
    pub website: Option<String>,
    pub phone_number: Option<String>,
    #[validate(custom(function = "email_or_blank"))]
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for editing a company. Omitted fields stay untouched, blank
/// ones are cleared.
pub struct SaveCompanyForm {
    pub company_name: Option<String>,
    pub industry: Option<String>,
    #[validate(custom(function = "url_or_blank"))]
    pub website: Option<String>,
    pub phone_number: Option<String>,
    #[validate(custom(function = "email_or_blank"))]
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl TryFrom<AddCompanyForm> for NewCompany {
    type Error = FormError;

    fn try_from(form: AddCompanyForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let company_name =
            CompanyName::new(form.company_name).map_err(|_| FormError::CompanyNameRequired)?;

        Ok(NewCompany {
            industry: form.industry,
            website: form.website,
            phone_number: form.phone_number,
            email_address: form.email_address,
            address: form.address,
            city: form.city,
            state: form.state,
            postal_code: form.postal_code,
            country: form.country,
            ..NewCompany::new(company_name)
        }
        .normalized())
    }
}

impl TryFrom<SaveCompanyForm> for UpdateCompany {
    type Error = FormError;

    fn try_from(form: SaveCompanyForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let company_name = form
            .company_name
            .map(CompanyName::new)
            .transpose()
            .map_err(|_| FormError::CompanyNameRequired)?;

        let updates = UpdateCompany {
            company_name,
            industry: form.industry,
            website: form.website,
            phone_number: form.phone_number,
            email_address: form.email_address.map(|email| email.trim().to_lowercase()),
            address: form.address,
            city: form.city,
            state: form.state,
            postal_code: form.postal_code,
            country: form.country,
        };
        if updates.is_empty() {
            return Err(FormError::EmptyUpdate);
        }
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn add_form_requires_a_name() {
        let form: AddCompanyForm =
            serde_json::from_value(json!({"companyName": "   ", "city": "Springfield"})).unwrap();
        assert!(matches!(
            NewCompany::try_from(form),
            Err(FormError::CompanyNameRequired)
        ));
    }

    #[test]
    fn add_form_normalizes_optional_fields() {
        let form: AddCompanyForm = serde_json::from_value(json!({
            "companyName": " Acme ",
            "emailAddress": "Sales@Acme.test",
            "website": "",
            "city": " Springfield ",
        }))
        .unwrap();

        let company = NewCompany::try_from(form).unwrap();

        assert_eq!(company.company_name.as_str(), "Acme");
        assert_eq!(company.email_address.as_deref(), Some("sales@acme.test"));
        assert_eq!(company.website, None);
        assert_eq!(company.city.as_deref(), Some("Springfield"));
    }

    #[test]
    fn malformed_email_is_a_validation_error() {
        let form = AddCompanyForm {
            company_name: "Acme".to_string(),
            email_address: Some("sales-at-acme".to_string()),
            ..AddCompanyForm::default()
        };
        assert!(matches!(
            NewCompany::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn save_form_keeps_blank_values_to_clear_columns() {
        let form = SaveCompanyForm {
            website: Some(String::new()),
            ..SaveCompanyForm::default()
        };

        let updates = UpdateCompany::try_from(form).unwrap();

        assert_eq!(updates.website.as_deref(), Some(""));
        assert_eq!(updates.company_name, None);
    }

    #[test]
    fn save_form_rejects_empty_updates_and_blank_names() {
        assert!(matches!(
            UpdateCompany::try_from(SaveCompanyForm::default()),
            Err(FormError::EmptyUpdate)
        ));

        let form = SaveCompanyForm {
            company_name: Some(" ".to_string()),
            ..SaveCompanyForm::default()
        };
        assert!(matches!(
            UpdateCompany::try_from(form),
            Err(FormError::CompanyNameRequired)
        ));
    }
}
