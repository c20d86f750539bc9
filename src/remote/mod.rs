//! Remote record client boundary.
//!
//! Everything the gateway knows about the hosted backend goes through
//! [`RecordClient`]. Two implementations exist: the HTTP client used in
//! production and [`memory::InMemoryClient`], which evaluates the same
//! request descriptors against process-local tables.

use crate::remote::envelope::Envelope;
use crate::remote::errors::ClientResult;
use crate::remote::params::{DeletePayload, FetchParams, RecordsPayload};

#[cfg(feature = "server")]
pub mod backend;
pub mod envelope;
pub mod errors;
#[cfg(feature = "server")]
pub mod http;
pub mod memory;
pub mod params;

/// Record-oriented access to backend tables.
#[allow(async_fn_in_trait)]
pub trait RecordClient {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> ClientResult<Envelope>;
    async fn get_record_by_id(
        &self,
        table: &str,
        id: i32,
        params: &FetchParams,
    ) -> ClientResult<Envelope>;
    async fn create_record(&self, table: &str, payload: &RecordsPayload)
    -> ClientResult<Envelope>;
    async fn update_record(&self, table: &str, payload: &RecordsPayload)
    -> ClientResult<Envelope>;
    async fn delete_record(&self, table: &str, payload: &DeletePayload) -> ClientResult<Envelope>;
}
