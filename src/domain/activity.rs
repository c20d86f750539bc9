use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ActivityDescription, ActivityId, ContactId, token_enum};

token_enum!(
    /// Kind of interaction recorded against a contact.
    ActivityType, default = Call,
    {
        Call => "call",
        Email => "email",
        Meeting => "meeting",
        Note => "note",
        Task => "task",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "Id")]
    pub id: ActivityId,
    pub contact_id: Option<ContactId>,
    pub contact_name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewActivity {
    pub contact_id: ContactId,
    pub activity_type: ActivityType,
    pub description: ActivityDescription,
    pub created_at: DateTime<Utc>,
}

impl NewActivity {
    #[must_use]
    pub fn new(
        contact_id: ContactId,
        activity_type: ActivityType,
        description: ActivityDescription,
    ) -> Self {
        Self {
            contact_id,
            activity_type,
            description,
            created_at: Utc::now(),
        }
    }
}

/// Partial update of an activity. `None` leaves the column untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateActivity {
    pub contact_id: Option<ContactId>,
    pub activity_type: Option<ActivityType>,
    pub description: Option<ActivityDescription>,
}

impl UpdateActivity {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
