//! HTTP client for the hosted backend.

use reqwest::{Client, Method};
use serde::Serialize;

use crate::remote::RecordClient;
use crate::remote::envelope::Envelope;
use crate::remote::errors::{ClientError, ClientResult};
use crate::remote::params::{DeletePayload, FetchParams, RecordsPayload};

/// Header carrying the project's public key.
pub const PUBLIC_KEY_HEADER: &str = "X-Public-Key";

#[derive(Clone, Debug)]
pub struct HttpRecordClient {
    http: Client,
    api_url: String,
    project_id: String,
    public_key: String,
}

impl HttpRecordClient {
    pub fn new(
        api_url: impl Into<String>,
        project_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> ClientResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            public_key: public_key.into(),
        })
    }

    fn records_url(&self, table: &str, suffix: &str) -> String {
        format!(
            "{}/projects/{}/tables/{}/records{}",
            self.api_url, self.project_id, table, suffix
        )
    }

    /// Sends `body` and decodes the envelope. Error statuses still carry an
    /// envelope most of the time, so the body is decoded before the status is
    /// considered.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: String,
        body: &B,
    ) -> ClientResult<Envelope> {
        let response = self
            .http
            .request(method, &url)
            .header(PUBLIC_KEY_HEADER, &self.public_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<Envelope>(&text) {
            Ok(envelope) => Ok(envelope),
            Err(err) if status.is_success() => Err(ClientError::from(err)),
            Err(_) => Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}

impl RecordClient for HttpRecordClient {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> ClientResult<Envelope> {
        let url = self.records_url(table, "/query");
        self.send(Method::POST, url, params).await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i32,
        params: &FetchParams,
    ) -> ClientResult<Envelope> {
        let url = self.records_url(table, &format!("/{id}/query"));
        self.send(Method::POST, url, params).await
    }

    async fn create_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> ClientResult<Envelope> {
        let url = self.records_url(table, "");
        self.send(Method::POST, url, payload).await
    }

    async fn update_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> ClientResult<Envelope> {
        let url = self.records_url(table, "");
        self.send(Method::PATCH, url, payload).await
    }

    async fn delete_record(&self, table: &str, payload: &DeletePayload) -> ClientResult<Envelope> {
        let url = self.records_url(table, "");
        self.send(Method::DELETE, url, payload).await
    }
}
