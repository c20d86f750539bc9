use serde_json::Value;

use crate::models::Table;
use crate::notifications::{Notice, Notifier};
use crate::remote::RecordClient;
use crate::remote::envelope::{Envelope, RecordResult};
use crate::remote::errors::ClientResult;
use crate::remote::params::{DeletePayload, FetchParams, RecordsPayload};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DeletePolicy, ListQuery};

/// Label used for field errors the backend did not label.
const DEFAULT_FIELD_LABEL: &str = "Field";

/// Repository forwarding every call to a [`RecordClient`].
///
/// Failures never escape: they are logged, surfaced through the notifier and
/// replaced by an empty list, `None` or `false`.
pub struct RemoteRepository<'a, C, N> {
    client: &'a C,
    notifier: &'a N,
    delete_policy: DeletePolicy,
}

impl<'a, C, N> RemoteRepository<'a, C, N>
where
    C: RecordClient,
    N: Notifier,
{
    pub fn new(client: &'a C, notifier: &'a N) -> Self {
        Self {
            client,
            notifier,
            delete_policy: DeletePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    /// Lists records of `T` and the total matching count.
    pub async fn list<T: Table>(&self, query: &ListQuery) -> (usize, Vec<T::Record>) {
        let fallback = format!("Failed to load {}", T::PLURAL);
        let params = query.to_params::<T>();

        let envelope = match accept(self.client.fetch_records(T::NAME, &params).await) {
            Ok(envelope) => envelope,
            Err(err) => {
                self.report(&err, &fallback);
                return (0, Vec::new());
            }
        };

        let rows = match envelope.data {
            Some(Value::Array(rows)) => rows,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![other],
        };
        let count = rows.len();
        let records: Vec<T::Record> = rows.into_iter().filter_map(decode::<T>).collect();

        (envelope.total.unwrap_or(count), records)
    }

    /// Fetches one record of `T`; a missing record is `None` without notice.
    pub async fn get<T: Table>(&self, id: i32) -> Option<T::Record> {
        let fallback = format!("Failed to load {}", T::SINGULAR);
        let params = FetchParams::with_fields(T::FIELDS);

        match accept(self.client.get_record_by_id(T::NAME, id, &params).await) {
            Ok(envelope) => envelope
                .data
                .filter(|data| !data.is_null())
                .and_then(decode::<T>),
            Err(err) => {
                self.report(&err, &fallback);
                None
            }
        }
    }

    /// Creates one record of `T` from its write shape.
    pub async fn create<T: Table>(&self, record: &T::Write) -> Option<T::Record> {
        let fallback = format!("Failed to create {}", T::SINGULAR);
        let payload = self.payload::<T>(record, &fallback)?;

        match accept(self.client.create_record(T::NAME, &payload).await) {
            Ok(envelope) => self.first_saved::<T>(envelope, &fallback),
            Err(err) => {
                self.report(&err, &fallback);
                None
            }
        }
    }

    /// Updates one record of `T`; the write shape carries the `Id`.
    pub async fn update<T: Table>(&self, record: &T::Write) -> Option<T::Record> {
        let fallback = format!("Failed to update {}", T::SINGULAR);
        let payload = self.payload::<T>(record, &fallback)?;

        match accept(self.client.update_record(T::NAME, &payload).await) {
            Ok(envelope) => self.first_saved::<T>(envelope, &fallback),
            Err(err) => {
                self.report(&err, &fallback);
                None
            }
        }
    }

    /// Deletes records of `T`, settling per-record outcomes with the
    /// configured [`DeletePolicy`].
    pub async fn delete<T: Table>(&self, ids: &[i32]) -> bool {
        let fallback = format!("Failed to delete {}", T::PLURAL);
        if ids.is_empty() {
            log::warn!("Delete of {} called without ids", T::PLURAL);
            return false;
        }

        let payload = DeletePayload {
            record_ids: ids.to_vec(),
        };
        let envelope = match accept(self.client.delete_record(T::NAME, &payload).await) {
            Ok(envelope) => envelope,
            Err(err) => {
                self.report(&err, &fallback);
                return false;
            }
        };

        let Some(results) = envelope.results else {
            return envelope.success;
        };

        let mut deleted = 0;
        for result in results {
            if result.success {
                deleted += 1;
            } else {
                self.report_record(result, &fallback);
            }
        }

        match self.delete_policy {
            DeletePolicy::Any => deleted > 0,
            DeletePolicy::All => deleted == ids.len(),
        }
    }

    fn payload<T: Table>(&self, record: &T::Write, fallback: &str) -> Option<RecordsPayload> {
        match serde_json::to_value(record) {
            Ok(record) => Some(RecordsPayload {
                records: vec![writable::<T>(record)],
            }),
            Err(err) => {
                self.report(&RepositoryError::from(err), fallback);
                None
            }
        }
    }

    /// First successfully written record of a create or update response.
    fn first_saved<T: Table>(&self, envelope: Envelope, fallback: &str) -> Option<T::Record> {
        let saved = match envelope.results {
            Some(results) => {
                let mut saved = Vec::new();
                for result in results {
                    if result.success {
                        saved.extend(result.data);
                    } else {
                        self.report_record(result, fallback);
                    }
                }
                saved
            }
            None => match envelope.data {
                Some(Value::Array(rows)) => rows,
                Some(Value::Null) | None => Vec::new(),
                Some(row) => vec![row],
            },
        };

        saved.into_iter().find_map(decode::<T>)
    }

    fn report(&self, err: &RepositoryError, fallback: &str) {
        log::error!("{fallback}: {err}");
        let message = match err {
            RepositoryError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        };
        self.notifier.notify(Notice::error(message));
    }

    fn report_record(&self, result: RecordResult, fallback: &str) {
        log::warn!(
            "{fallback}: record failed with {} field error(s): {}",
            result.errors.len(),
            result.message.as_deref().unwrap_or_default()
        );

        let mut reported = false;
        for error in result.errors {
            let label = error
                .field_label
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FIELD_LABEL.to_string());
            self.notifier
                .notify(Notice::error(format!("{label}: {}", error.message)));
            reported = true;
        }
        if let Some(message) = result.message.filter(|m| !m.trim().is_empty()) {
            self.notifier.notify(Notice::error(message));
            reported = true;
        }
        if !reported {
            self.notifier.notify(Notice::error(fallback));
        }
    }
}

/// Turns transport failures and `success: false` envelopes into errors.
fn accept(result: ClientResult<Envelope>) -> RepositoryResult<Envelope> {
    let envelope = result?;
    if envelope.success {
        Ok(envelope)
    } else {
        Err(RepositoryError::Rejected(
            envelope.message.unwrap_or_default(),
        ))
    }
}

/// Drops columns `T` does not accept on writes.
fn writable<T: Table>(record: Value) -> Value {
    let Value::Object(columns) = record else {
        return record;
    };
    Value::Object(
        columns
            .into_iter()
            .filter(|(column, _)| {
                let keep = T::is_writable(column);
                if !keep {
                    log::warn!("Dropping non-updateable {} column {column}", T::SINGULAR);
                }
                keep
            })
            .collect(),
    )
}

/// Decodes one backend row, dropping rows that do not map to a record.
fn decode<T: Table>(row: Value) -> Option<T::Record> {
    let row = match serde_json::from_value::<T::Row>(row) {
        Ok(row) => row,
        Err(err) => {
            log::warn!("Skipping malformed {} row: {err}", T::SINGULAR);
            return None;
        }
    };
    match <T::Record as TryFrom<T::Row>>::try_from(row) {
        Ok(record) => Some(record),
        Err(err) => {
            let err = RepositoryError::from(err);
            log::warn!("Skipping {} row: {err}", T::SINGULAR);
            None
        }
    }
}
