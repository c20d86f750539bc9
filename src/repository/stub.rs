//! Scripted record client for adapter tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{Value, json};

use crate::remote::RecordClient;
use crate::remote::envelope::Envelope;
use crate::remote::errors::{ClientError, ClientResult};
use crate::remote::params::{DeletePayload, FetchParams, RecordsPayload};

/// A call observed by [`ScriptedClient`]: operation, table and request body.
pub type Call = (&'static str, String, Value);

/// Answers calls with queued responses and records every request.
#[derive(Default)]
pub struct ScriptedClient {
    responses: RefCell<VecDeque<ClientResult<Envelope>>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, envelope: Envelope) -> Self {
        self.responses.borrow_mut().push_back(Ok(envelope));
        self
    }

    pub fn respond_json(self, body: Value) -> Self {
        let envelope = serde_json::from_value(body).expect("envelope json");
        self.respond(envelope)
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ClientError::Transport(message.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn answer(&self, op: &'static str, table: &str, body: Value) -> ClientResult<Envelope> {
        self.calls.borrow_mut().push((op, table.to_string(), body));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Envelope::ok(json!([]))))
    }
}

impl RecordClient for ScriptedClient {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> ClientResult<Envelope> {
        self.answer("fetch", table, json!(params))
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i32,
        params: &FetchParams,
    ) -> ClientResult<Envelope> {
        self.answer("get", table, json!({"id": id, "params": params}))
    }

    async fn create_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> ClientResult<Envelope> {
        self.answer("create", table, json!(payload))
    }

    async fn update_record(
        &self,
        table: &str,
        payload: &RecordsPayload,
    ) -> ClientResult<Envelope> {
        self.answer("update", table, json!(payload))
    }

    async fn delete_record(&self, table: &str, payload: &DeletePayload) -> ClientResult<Envelope> {
        self.answer("delete", table, json!(payload))
    }
}
