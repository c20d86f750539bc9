use serde::Deserialize;

use crate::domain::activity::{ActivityType, NewActivity, UpdateActivity};
use crate::domain::types::{ActivityDescription, ContactId};
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Form data for logging an activity against a contact.
pub struct AddActivityForm {
    pub contact_id: i32,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Form data for editing an activity.
pub struct SaveActivityForm {
    pub contact_id: Option<i32>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<AddActivityForm> for NewActivity {
    type Error = FormError;

    fn try_from(form: AddActivityForm) -> Result<Self, Self::Error> {
        let contact_id = ContactId::new(form.contact_id)?;
        let description = ActivityDescription::new(form.description)
            .map_err(|_| FormError::DescriptionRequired)?;
        let activity_type = form
            .activity_type
            .as_deref()
            .map(ActivityType::from)
            .unwrap_or_default();

        Ok(NewActivity::new(contact_id, activity_type, description))
    }
}

impl TryFrom<SaveActivityForm> for UpdateActivity {
    type Error = FormError;

    fn try_from(form: SaveActivityForm) -> Result<Self, Self::Error> {
        let updates = UpdateActivity {
            contact_id: form.contact_id.map(ContactId::new).transpose()?,
            activity_type: form.activity_type.as_deref().map(ActivityType::from),
            description: form
                .description
                .map(ActivityDescription::new)
                .transpose()
                .map_err(|_| FormError::DescriptionRequired)?,
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
    fn description_is_sanitized() {
        let form: AddActivityForm = serde_json::from_value(json!({
            "contactId": 3,
            "type": "meeting",
            "description": "Demo <script>alert(1)</script>went well",
        }))
        .unwrap();

        let activity = NewActivity::try_from(form).unwrap();

        assert_eq!(activity.activity_type, ActivityType::Meeting);
        assert_eq!(activity.description.as_str(), "Demo went well");
    }

    #[test]
    fn markup_only_description_is_rejected() {
        let form = AddActivityForm {
            contact_id: 3,
            activity_type: None,
            description: "<script>x</script>".to_string(),
        };
        assert!(matches!(
            NewActivity::try_from(form),
            Err(FormError::DescriptionRequired)
        ));
    }

    #[test]
    fn contact_id_must_be_positive() {
        let form = AddActivityForm {
            contact_id: 0,
            activity_type: None,
            description: "Call back".to_string(),
        };
        assert!(matches!(
            NewActivity::try_from(form),
            Err(FormError::InvalidId)
        ));
    }
}
