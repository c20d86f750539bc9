//! Remote client selected by configuration.

use crate::models::config::{BackendKind, ServerConfig};
use crate::remote::RecordClient;
use crate::remote::envelope::Envelope;
use crate::remote::errors::ClientResult;
use crate::remote::http::HttpRecordClient;
use crate::remote::memory::InMemoryClient;
use crate::remote::params::{DeletePayload, FetchParams, RecordsPayload};

#[derive(Debug)]
pub enum Backend {
    Http(HttpRecordClient),
    Memory(InMemoryClient),
}

impl Backend {
    pub fn from_config(config: &ServerConfig) -> ClientResult<Self> {
        match config.backend {
            BackendKind::Remote => Ok(Backend::Http(HttpRecordClient::new(
                config.api_url.as_str(),
                config.project_id.as_str(),
                config.public_key.as_str(),
            )?)),
            BackendKind::Memory => Ok(Backend::Memory(InMemoryClient::crm())),
        }
    }
}

impl RecordClient for Backend {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> ClientResult<Envelope> {
        match self {
            Backend::Http(client) => client.fetch_records(table, params).await,
            Backend::Memory(client) => client.fetch_records(table, params).await,
        }
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i32,
        params: &FetchParams,
    ) -> ClientResult<Envelope> {
        match self {
            Backend::Http(client) => client.get_record_by_id(table, id, params).await,
            Backend::Memory(client) => client.get_record_by_id(table, id, params).await,
        }
    }

    async fn create_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> ClientResult<Envelope> {
        match self {
            Backend::Http(client) => client.create_record(table, payload).await,
            Backend::Memory(client) => client.create_record(table, payload).await,
        }
    }

    async fn update_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> ClientResult<Envelope> {
        match self {
            Backend::Http(client) => client.update_record(table, payload).await,
            Backend::Memory(client) => client.update_record(table, payload).await,
        }
    }

    async fn delete_record(&self, table: &str, payload: &DeletePayload) -> ClientResult<Envelope> {
        match self {
            Backend::Http(client) => client.delete_record(table, payload).await,
            Backend::Memory(client) => client.delete_record(table, payload).await,
        }
    }
}
