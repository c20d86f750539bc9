use serde::{Deserialize, Serialize};

use crate::domain::normalize_text;
use crate::domain::types::{CompanyId, CompanyName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "Id")]
    pub id: CompanyId,
    pub company_name: String,
    pub industry: String,
    pub website: String,
    pub phone_number: String,
    pub email_address: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl Company {
    /// City, state and country joined for display, skipping blanks.
    pub fn location(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCompany {
    pub company_name: CompanyName,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl NewCompany {
    /// Creates a company with only the required name set.
    #[must_use]
    pub fn new(company_name: CompanyName) -> Self {
        Self {
            company_name,
            industry: None,
            website: None,
            phone_number: None,
            email_address: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
        }
    }

    /// Trims every optional field and drops the blank ones.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            company_name: self.company_name,
            industry: normalize_text(self.industry),
            website: normalize_text(self.website),
            phone_number: normalize_text(self.phone_number),
            email_address: normalize_text(self.email_address).map(|s| s.to_lowercase()),
            address: normalize_text(self.address),
            city: normalize_text(self.city),
            state: normalize_text(self.state),
            postal_code: normalize_text(self.postal_code),
            country: normalize_text(self.country),
        }
    }
}

/// Partial update of a company.
///
/// `None` leaves the column untouched. `Some("")` clears a nullable column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateCompany {
    pub company_name: Option<CompanyName>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl UpdateCompany {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
