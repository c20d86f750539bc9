use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::{ContactStatus, NewContact, UpdateContact};
use crate::forms::{FormError, email_or_blank};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for adding a contact.
pub struct AddContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(custom(function = "email_or_blank"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for editing a contact.
pub struct SaveContactForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(custom(function = "email_or_blank"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
/// Form data for moving a contact to another status.
pub struct ContactStatusForm {
    pub status: String,
}

impl TryFrom<AddContactForm> for NewContact {
    type Error = FormError;

    fn try_from(form: AddContactForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.first_name.trim().is_empty() {
            return Err(FormError::FirstNameRequired);
        }

        Ok(NewContact::new(
            form.first_name,
            form.last_name,
            form.email,
            form.phone,
            form.company,
            form.status
                .as_deref()
                .map(ContactStatus::from)
                .unwrap_or_default(),
        ))
    }
}

impl TryFrom<SaveContactForm> for UpdateContact {
    type Error = FormError;

    fn try_from(form: SaveContactForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form
            .first_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(FormError::FirstNameRequired);
        }

        let updates = UpdateContact {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            company: form.company,
            status: form.status.as_deref().map(ContactStatus::from),
        };
        if updates.is_empty() {
            return Err(FormError::EmptyUpdate);
        }
        Ok(updates)
    }
}

impl From<ContactStatusForm> for UpdateContact {
    fn from(form: ContactStatusForm) -> Self {
        UpdateContact::status(ContactStatus::from(form.status.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn add_form_defaults_status_to_lead() {
        let form: AddContactForm = serde_json::from_value(json!({
            "firstName": "Jane",
            "lastName": "Roe",
            "email": "JANE@roe.test",
        }))
        .unwrap();

        let contact = NewContact::try_from(form).unwrap();

        assert_eq!(contact.status, ContactStatus::Lead);
        assert_eq!(contact.email.as_deref(), Some("jane@roe.test"));
    }

    #[test]
    fn add_form_requires_first_name() {
        let form = AddContactForm {
            last_name: "Roe".to_string(),
            ..AddContactForm::default()
        };
        assert!(matches!(
            NewContact::try_from(form),
            Err(FormError::FirstNameRequired)
        ));
    }

    #[test]
    fn save_form_maps_status_tokens() {
        let form = SaveContactForm {
            status: Some("Customer".to_string()),
            ..SaveContactForm::default()
        };

        let updates = UpdateContact::try_from(form).unwrap();
        assert_eq!(updates, UpdateContact::status(ContactStatus::Customer));
    }

    #[test]
    fn status_form_keeps_unknown_tokens() {
        let updates = UpdateContact::from(ContactStatusForm {
            status: "churned".to_string(),
        });
        assert_eq!(
            updates.status,
            Some(ContactStatus::Other("churned".to_string()))
        );
    }
}
