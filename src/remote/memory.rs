//! Process-local backend evaluating request descriptors against in-memory
//! tables.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value, json};

use crate::models::coerce::{row_id_from, text_from};
use crate::remote::RecordClient;
use crate::remote::envelope::{Envelope, FieldError, RecordResult};
use crate::remote::errors::ClientResult;
use crate::remote::params::{
    DeletePayload, FetchParams, GroupOperator, Operator, OrderBy, PagingInfo, RecordsPayload,
    SortDirection,
};

type Row = Map<String, Value>;

#[derive(Debug, Default)]
struct MemoryTable {
    last_id: i32,
    rows: BTreeMap<i32, Row>,
}

impl MemoryTable {
    /// Stores a row, keeping a free positive `Id` when one is supplied.
    fn insert(&mut self, mut row: Row) -> i32 {
        let id = row
            .get("Id")
            .and_then(row_id_from)
            .filter(|id| !self.rows.contains_key(id))
            .unwrap_or(self.last_id + 1);
        self.last_id = self.last_id.max(id);

        let now = now_stamp();
        row.insert("Id".to_string(), json!(id));
        row.entry("CreatedOn").or_insert_with(|| now.clone());
        row.entry("ModifiedOn").or_insert(now);
        self.rows.insert(id, row);
        id
    }
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, MemoryTable>,
    rejections: HashMap<(String, i32), String>,
    required: HashMap<String, Vec<(String, String)>>,
    outages: HashMap<String, String>,
}

#[derive(Clone, Debug)]
struct LookupColumn {
    table: String,
    column: String,
    target: String,
}

/// In-memory [`RecordClient`] with the filtering, paging and per-record
/// result semantics of the hosted backend.
#[derive(Debug, Default)]
pub struct InMemoryClient {
    state: Mutex<State>,
    lookups: Vec<LookupColumn>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client with the lookup columns of the CRM tables expanded to
    /// `{Id, Name}` on read.
    pub fn crm() -> Self {
        Self::new()
            .with_lookup("deal_c", "contactId_c", "contact_c")
            .with_lookup("activity_c", "contact_id_c", "contact_c")
    }

    /// Expands `column` of `table` into `{Id, Name}` using the `Name` column
    /// of the referenced `target` row.
    #[must_use]
    pub fn with_lookup(
        mut self,
        table: impl Into<String>,
        column: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.lookups.push(LookupColumn {
            table: table.into(),
            column: column.into(),
            target: target.into(),
        });
        self
    }

    /// Inserts rows as-is, returning their ids.
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = Value>) -> Vec<i32> {
        let mut state = self.lock();
        let table = state.tables.entry(table.to_string()).or_default();
        rows.into_iter()
            .map(|row| match row {
                Value::Object(row) => table.insert(row),
                _ => table.insert(Row::new()),
            })
            .collect()
    }

    /// Stored rows of `table` ordered by id.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock()
            .tables
            .get(table)
            .map(|t| t.rows.values().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    /// Makes updates and deletes of the given row fail with `message`.
    pub fn reject(&self, table: &str, id: i32, message: impl Into<String>) {
        self.lock()
            .rejections
            .insert((table.to_string(), id), message.into());
    }

    /// Makes creates without a value for `column` fail with a field error
    /// labelled `label`.
    pub fn require(&self, table: &str, column: impl Into<String>, label: impl Into<String>) {
        self.lock()
            .required
            .entry(table.to_string())
            .or_default()
            .push((column.into(), label.into()));
    }

    /// Makes every call on `table` answer `success: false` with `message`.
    pub fn fail_requests(&self, table: &str, message: impl Into<String>) {
        self.lock().outages.insert(table.to_string(), message.into());
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn present(&self, state: &State, table: &str, row: &Row, fields: &FetchParams) -> Value {
        let mut out: Row = if fields.fields.is_empty() {
            row.clone()
        } else {
            fields
                .field_names()
                .filter_map(|name| row.get(name).map(|v| (name.to_string(), v.clone())))
                .collect()
        };

        for lookup in self.lookups.iter().filter(|l| l.table == table) {
            let Some(value) = out.get_mut(&lookup.column) else {
                continue;
            };
            let Some(id) = row_id_from(value) else {
                continue;
            };
            let name = state
                .tables
                .get(&lookup.target)
                .and_then(|t| t.rows.get(&id))
                .and_then(|target| target.get("Name"))
                .cloned()
                .unwrap_or(Value::Null);
            *value = json!({"Id": id, "Name": name});
        }

        Value::Object(out)
    }
}

impl RecordClient for InMemoryClient {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> ClientResult<Envelope> {
        let state = self.lock();
        if let Some(message) = state.outages.get(table) {
            return Ok(Envelope::failure(message.clone()));
        }

        let mut rows: Vec<&Row> = state
            .tables
            .get(table)
            .map(|t| t.rows.values().filter(|row| row_matches(row, params)).collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| compare_rows(a, b, &params.order_by));

        let total = rows.len();
        let page: Vec<&Row> = match params.paging_info {
            Some(PagingInfo { limit, offset }) => {
                rows.into_iter().skip(offset).take(limit).collect()
            }
            None => rows,
        };
        let data = page
            .into_iter()
            .map(|row| self.present(&state, table, row, params))
            .collect();

        Ok(Envelope::ok(Value::Array(data)).with_total(total))
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i32,
        params: &FetchParams,
    ) -> ClientResult<Envelope> {
        let state = self.lock();
        if let Some(message) = state.outages.get(table) {
            return Ok(Envelope::failure(message.clone()));
        }

        let data = state
            .tables
            .get(table)
            .and_then(|t| t.rows.get(&id))
            .map(|row| self.present(&state, table, row, params))
            .unwrap_or(Value::Null);

        Ok(Envelope::ok(data))
    }

    async fn create_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> ClientResult<Envelope> {
        let mut state = self.lock();
        if let Some(message) = state.outages.get(table) {
            return Ok(Envelope::failure(message.clone()));
        }

        let required = state.required.get(table).cloned().unwrap_or_default();
        let mut results = Vec::with_capacity(payload.records.len());

        for record in &payload.records {
            let Some(fields) = record.as_object() else {
                results.push(RecordResult::failed(
                    Some("Record must be an object".to_string()),
                    Vec::new(),
                ));
                continue;
            };

            let errors: Vec<FieldError> = required
                .iter()
                .filter(|(column, _)| is_blank(fields.get(column)))
                .map(|(_, label)| FieldError::new(label.as_str(), "is required"))
                .collect();
            if !errors.is_empty() {
                results.push(RecordResult::failed(
                    Some("Record could not be created".to_string()),
                    errors,
                ));
                continue;
            }

            let mut row = fields.clone();
            row.remove("Id");
            row.remove("CreatedOn");
            row.remove("ModifiedOn");
            let id = state
                .tables
                .entry(table.to_string())
                .or_default()
                .insert(row);

            let data = state
                .tables
                .get(table)
                .and_then(|t| t.rows.get(&id))
                .map(|row| self.present(&state, table, row, &FetchParams::default()))
                .unwrap_or(Value::Null);
            results.push(RecordResult::ok(data));
        }

        Ok(Envelope::with_results(results))
    }

    async fn update_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> ClientResult<Envelope> {
        let mut state = self.lock();
        if let Some(message) = state.outages.get(table) {
            return Ok(Envelope::failure(message.clone()));
        }

        let mut results = Vec::with_capacity(payload.records.len());

        for record in &payload.records {
            let Some(id) = record.get("Id").and_then(row_id_from) else {
                results.push(RecordResult::failed(
                    Some("Record Id is required".to_string()),
                    Vec::new(),
                ));
                continue;
            };
            if let Some(message) = state.rejections.get(&(table.to_string(), id)) {
                results.push(RecordResult::failed(Some(message.clone()), Vec::new()));
                continue;
            }

            let Some(row) = state
                .tables
                .get_mut(table)
                .and_then(|t| t.rows.get_mut(&id))
            else {
                results.push(RecordResult::failed(
                    Some("Record not found".to_string()),
                    Vec::new(),
                ));
                continue;
            };

            if let Some(fields) = record.as_object() {
                for (column, value) in fields.iter().filter(|(column, _)| *column != "Id") {
                    row.insert(column.clone(), value.clone());
                }
            }
            row.insert("ModifiedOn".to_string(), now_stamp());

            let data = state
                .tables
                .get(table)
                .and_then(|t| t.rows.get(&id))
                .map(|row| self.present(&state, table, row, &FetchParams::default()))
                .unwrap_or(Value::Null);
            results.push(RecordResult::ok(data));
        }

        Ok(Envelope::with_results(results))
    }

    async fn delete_record(&self, table: &str, payload: &DeletePayload) -> ClientResult<Envelope> {
        let mut state = self.lock();
        if let Some(message) = state.outages.get(table) {
            return Ok(Envelope::failure(message.clone()));
        }

        let mut results = Vec::with_capacity(payload.record_ids.len());

        for &id in &payload.record_ids {
            if let Some(message) = state.rejections.get(&(table.to_string(), id)) {
                results.push(RecordResult::failed(Some(message.clone()), Vec::new()));
                continue;
            }

            let removed = state
                .tables
                .get_mut(table)
                .and_then(|t| t.rows.remove(&id))
                .is_some();
            if removed {
                results.push(RecordResult::ok(json!({"Id": id})));
            } else {
                results.push(RecordResult::failed(
                    Some("Record not found".to_string()),
                    Vec::new(),
                ));
            }
        }

        Ok(Envelope::with_results(results))
    }
}

fn now_stamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Lookup objects compare by their id.
fn scalar(value: &Value) -> Value {
    match value {
        Value::Object(map) => map.get("Id").cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    match (as_number(actual), as_number(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => text_from(actual).eq_ignore_ascii_case(&text_from(expected)),
    }
}

fn condition_matches(value: Option<&Value>, operator: Operator, values: &[Value]) -> bool {
    let Some(actual) = value.map(scalar) else {
        return false;
    };
    values.iter().any(|expected| match operator {
        Operator::EqualTo => loosely_equal(&actual, expected),
        Operator::Contains => text_from(&actual)
            .to_lowercase()
            .contains(&text_from(expected).to_lowercase()),
    })
}

fn combine(operator: GroupOperator, mut outcomes: impl Iterator<Item = bool>) -> bool {
    match operator {
        GroupOperator::Or => outcomes.any(|hit| hit),
        GroupOperator::And => outcomes.all(|hit| hit),
    }
}

fn row_matches(row: &Row, params: &FetchParams) -> bool {
    let clauses = params.conditions.iter().all(|clause| {
        condition_matches(row.get(&clause.field_name), clause.operator, &clause.values)
            == clause.include
    });

    clauses
        && params.where_groups.iter().all(|group| {
            combine(
                group.operator,
                group.sub_groups.iter().map(|sub| {
                    combine(
                        sub.operator,
                        sub.conditions.iter().map(|c| {
                            condition_matches(row.get(&c.field_name), c.operator, &c.values)
                        }),
                    )
                }),
            )
        })
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn key(value: Option<&Value>) -> (u8, f64, String) {
        match value.map(scalar) {
            None | Some(Value::Null) => (0, 0.0, String::new()),
            Some(Value::Number(n)) => (1, n.as_f64().unwrap_or_default(), String::new()),
            Some(other) => (2, 0.0, text_from(&other).to_lowercase()),
        }
    }

    let (rank_a, num_a, text_a) = key(a);
    let (rank_b, num_b, text_b) = key(b);
    rank_a
        .cmp(&rank_b)
        .then_with(|| num_a.partial_cmp(&num_b).unwrap_or(Ordering::Equal))
        .then_with(|| text_a.cmp(&text_b))
}

fn compare_rows(a: &Row, b: &Row, order_by: &[OrderBy]) -> Ordering {
    order_by
        .iter()
        .map(|order| {
            let ordering = compare_values(a.get(&order.field_name), b.get(&order.field_name));
            match order.sorttype {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| compare_values(a.get("Id"), b.get("Id")))
}
