use serde::{Deserialize, Serialize};

use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::types::{CompanyId, TypeConstraintError};
use crate::models::Table;
use crate::models::coerce::{self, patch_text};

/// Descriptor of the `companies_c` table.
pub struct CompanyTable;

impl Table for CompanyTable {
    const NAME: &'static str = "companies_c";
    const SINGULAR: &'static str = "company";
    const PLURAL: &'static str = "companies";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "companyName",
        "industry",
        "website",
        "phoneNumber",
        "emailAddress",
        "address",
        "city",
        "state",
        "postalCode",
        "country",
    ];
    const UPDATEABLE_FIELDS: &'static [&'static str] = &[
        "companyName",
        "industry",
        "website",
        "phoneNumber",
        "emailAddress",
        "address",
        "city",
        "state",
        "postalCode",
        "country",
    ];
    const SEARCH_FIELDS: &'static [&'static str] =
        &["companyName", "industry", "emailAddress", "phoneNumber"];
    const CATEGORY_FIELD: Option<&'static str> = None;
    const CONTACT_FIELD: Option<&'static str> = None;
    const DEFAULT_SORT: &'static str = "companyName";

    type Row = CompanyRow;
    type Record = Company;
    type Write = CompanyRecord;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Read shape of a `companies_c` row.
pub struct CompanyRow {
    #[serde(rename = "Id", default, deserialize_with = "coerce::row_id")]
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub company_name: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub industry: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub website: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub email_address: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub address: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub city: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub state: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub country: String,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Write shape of a `companies_c` row.
pub struct CompanyRecord {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Option<String>>,
}

impl TryFrom<CompanyRow> for Company {
    type Error = TypeConstraintError;

    fn try_from(row: CompanyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::new(row.id.unwrap_or_default())?,
            company_name: row.company_name,
            industry: row.industry,
            website: row.website,
            phone_number: row.phone_number,
            email_address: row.email_address,
            address: row.address,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
            country: row.country,
        })
    }
}

impl From<&NewCompany> for CompanyRecord {
    fn from(company: &NewCompany) -> Self {
        let present = |value: &Option<String>| patch_text(value.as_ref()).flatten().map(Some);
        Self {
            id: None,
            company_name: Some(company.company_name.to_string()),
            industry: present(&company.industry),
            website: present(&company.website),
            phone_number: present(&company.phone_number),
            email_address: present(&company.email_address),
            address: present(&company.address),
            city: present(&company.city),
            state: present(&company.state),
            postal_code: present(&company.postal_code),
            country: present(&company.country),
        }
    }
}

impl From<(CompanyId, &UpdateCompany)> for CompanyRecord {
    fn from((id, updates): (CompanyId, &UpdateCompany)) -> Self {
        Self {
            id: Some(id.get()),
            company_name: updates.company_name.as_ref().map(ToString::to_string),
            industry: patch_text(updates.industry.as_ref()),
            website: patch_text(updates.website.as_ref()),
            phone_number: patch_text(updates.phone_number.as_ref()),
            email_address: patch_text(updates.email_address.as_ref()),
            address: patch_text(updates.address.as_ref()),
            city: patch_text(updates.city.as_ref()),
            state: patch_text(updates.state.as_ref()),
            postal_code: patch_text(updates.postal_code.as_ref()),
            country: patch_text(updates.country.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::types::CompanyName;
    use crate::models::unwritable_columns;

    fn sample_new() -> NewCompany {
        NewCompany {
            industry: Some("Manufacturing".to_string()),
            website: Some("https://acme.test".to_string()),
            email_address: Some("sales@acme.test".to_string()),
            city: Some("Springfield".to_string()),
            country: Some("US".to_string()),
            ..NewCompany::new(CompanyName::new("Acme").unwrap())
        }
    }

    fn keys(value: &Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn create_record_omits_unsupplied_columns() {
        let record = serde_json::to_value(CompanyRecord::from(&sample_new())).unwrap();

        assert_eq!(
            record,
            json!({
                "companyName": "Acme",
                "industry": "Manufacturing",
                "website": "https://acme.test",
                "emailAddress": "sales@acme.test",
                "city": "Springfield",
                "country": "US",
            })
        );
    }

    #[test]
    fn update_record_contains_only_supplied_columns() {
        let updates = UpdateCompany {
            city: Some("Shelbyville".to_string()),
            website: Some("   ".to_string()),
            ..UpdateCompany::default()
        };
        let id = CompanyId::new(9).unwrap();

        let record = serde_json::to_value(CompanyRecord::from((id, &updates))).unwrap();

        assert_eq!(
            record,
            json!({"Id": 9, "city": "Shelbyville", "website": null})
        );
    }

    #[test]
    fn write_records_stay_within_updateable_columns() {
        let text = || Some(Some("x".to_string()));
        let full = CompanyRecord {
            id: Some(1),
            company_name: Some("Acme".to_string()),
            industry: text(),
            website: text(),
            phone_number: text(),
            email_address: text(),
            address: text(),
            city: text(),
            state: text(),
            postal_code: text(),
            country: text(),
        };

        assert_eq!(keys(&serde_json::to_value(&full).unwrap()).len(), 11);
        assert!(unwritable_columns::<CompanyTable>(&full).is_empty());
        assert!(unwritable_columns::<CompanyTable>(&CompanyRecord::from(&sample_new())).is_empty());
    }

    #[test]
    fn row_round_trip_restores_supplied_fields() {
        let new = sample_new();
        let mut written = serde_json::to_value(CompanyRecord::from(&new)).unwrap();
        written["Id"] = json!(31);

        let row: CompanyRow = serde_json::from_value(written).unwrap();
        let company = Company::try_from(row).unwrap();

        assert_eq!(company.id.get(), 31);
        assert_eq!(company.company_name, "Acme");
        assert_eq!(company.industry, "Manufacturing");
        assert_eq!(company.website, "https://acme.test");
        assert_eq!(company.email_address, "sales@acme.test");
        assert_eq!(company.location(), "Springfield, US");
        assert_eq!(company.phone_number, "");
    }

    #[test]
    fn missing_columns_default_to_empty_strings() {
        let row: CompanyRow =
            serde_json::from_value(json!({"Id": "4", "companyName": "Globex", "city": null}))
                .unwrap();
        let company = Company::try_from(row).unwrap();

        assert_eq!(company.id.get(), 4);
        assert_eq!(company.city, "");
        assert_eq!(company.country, "");
    }

    #[test]
    fn rows_without_id_are_rejected() {
        let row: CompanyRow = serde_json::from_value(json!({"companyName": "Ghost"})).unwrap();
        assert_eq!(
            Company::try_from(row),
            Err(TypeConstraintError::NonPositiveId)
        );
    }
}
