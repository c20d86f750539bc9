//! Request descriptors understood by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read request: requested columns, filters, ordering and paging.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldRef>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<WhereClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub where_groups: Vec<WhereGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

impl FetchParams {
    /// Requests the given columns and nothing else.
    pub fn with_fields(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|name| FieldRef::new(*name)).collect(),
            ..Self::default()
        }
    }

    /// Column names requested by this descriptor.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.name.as_str())
    }
}

/// `{"field": {"Name": "..."}}`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldRef {
    pub field: FieldName,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            field: FieldName { name: name.into() },
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Operator {
    /// Loose equality against any of the values.
    EqualTo,
    /// Case-insensitive substring match against any of the values.
    Contains,
}

/// Top-level `where` clause. Clauses are combined with AND.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WhereClause {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
    #[serde(default = "include_default")]
    pub include: bool,
}

fn include_default() -> bool {
    true
}

impl WhereClause {
    pub fn new(field_name: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            field_name: field_name.into(),
            operator,
            values: vec![value],
            include: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    #[default]
    Or,
    And,
}

/// Grouped conditions, `{"operator": "OR", "subGroups": [...]}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhereGroup {
    pub operator: GroupOperator,
    pub sub_groups: Vec<SubGroup>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubGroup {
    pub conditions: Vec<Condition>,
    pub operator: GroupOperator,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

impl WhereGroup {
    /// One OR group matching `value` against any of `fields`.
    pub fn any_of(fields: &[&str], operator: Operator, value: Value) -> Self {
        let conditions = fields
            .iter()
            .map(|field| Condition {
                field_name: (*field).to_string(),
                operator,
                values: vec![value.clone()],
            })
            .collect();

        Self {
            operator: GroupOperator::Or,
            sub_groups: vec![SubGroup {
                conditions,
                operator: GroupOperator::Or,
            }],
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field_name: String,
    pub sorttype: SortDirection,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagingInfo {
    pub limit: usize,
    pub offset: usize,
}

/// Body of create and update calls.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordsPayload {
    pub records: Vec<Value>,
}

/// Body of delete calls.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletePayload {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn fetch_params_use_backend_keys() {
        let params = FetchParams {
            conditions: vec![WhereClause::new("stage_c", Operator::EqualTo, json!("Proposal"))],
            where_groups: vec![WhereGroup::any_of(
                &["first_name_c", "email_c"],
                Operator::Contains,
                json!("ann"),
            )],
            order_by: vec![OrderBy {
                field_name: "Id".to_string(),
                sorttype: SortDirection::Desc,
            }],
            paging_info: Some(PagingInfo {
                limit: 20,
                offset: 40,
            }),
            ..FetchParams::with_fields(&["Id"])
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "fields": [{"field": {"Name": "Id"}}],
                "where": [{
                    "FieldName": "stage_c",
                    "Operator": "EqualTo",
                    "Values": ["Proposal"],
                    "Include": true,
                }],
                "whereGroups": [{
                    "operator": "OR",
                    "subGroups": [{
                        "conditions": [
                            {"fieldName": "first_name_c", "operator": "Contains", "values": ["ann"]},
                            {"fieldName": "email_c", "operator": "Contains", "values": ["ann"]},
                        ],
                        "operator": "OR",
                    }],
                }],
                "orderBy": [{"fieldName": "Id", "sorttype": "DESC"}],
                "pagingInfo": {"limit": 20, "offset": 40},
            })
        );
    }

    #[test]
    fn empty_collections_are_not_sent() {
        let params = FetchParams::with_fields(&["Id", "Name"]);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"fields": [{"field": {"Name": "Id"}}, {"field": {"Name": "Name"}}]})
        );
    }

    #[test]
    fn delete_payload_uses_record_ids_key() {
        let payload = DeletePayload {
            record_ids: vec![1, 2],
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({"RecordIds": [1, 2]})
        );
    }
}
