//! Shared test doubles for dispatcher-level tests.
//!
//! The scripted transport replaces the network: tests enqueue the exact
//! outcomes the server would produce and inspect every decorated request
//! the dispatcher sent.  The store is owned by the test, not shared
//! process-wide.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use dynect_core::{Transport, TransportError, WireRequest, WireResponse};

use crate::client::Client;
use crate::config::Config;

/// A transport that replays a scripted sequence of outcomes and records
/// every request it was handed.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    inner: Arc<ScriptInner>,
}

#[derive(Default)]
struct ScriptInner {
    script: Mutex<VecDeque<Result<WireResponse, TransportError>>>,
    seen: Mutex<Vec<WireRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn push_ok(&self, response: WireResponse) {
        self.inner.script.lock().unwrap().push_back(Ok(response));
    }

    pub(crate) fn push_err(&self, err: TransportError) {
        self.inner.script.lock().unwrap().push_back(Err(err));
    }

    /// Every request exchanged so far, in order.
    pub(crate) fn seen(&self) -> Vec<WireRequest> {
        self.inner.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn exchange(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        self.inner.seen.lock().unwrap().push(request);
        self.inner
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport script exhausted")
    }
}

pub(crate) fn test_config() -> Config {
    Config::new("acme", "ops", "hunter2")
}

pub(crate) fn test_client(transport: &ScriptedTransport) -> Client {
    Client::with_transport(test_config(), Box::new(transport.clone())).unwrap()
}

/// A JSON wire response with the given envelope body.
pub(crate) fn json_response(status: u16, body: Value) -> WireResponse {
    WireResponse {
        status,
        headers: BTreeMap::from([(
            "content-type".to_string(),
            "application/json".to_string(),
        )]),
        body: body.to_string().into_bytes(),
    }
}

pub(crate) fn login_success(token: &str) -> WireResponse {
    json_response(
        200,
        json!({
            "status": "success",
            "data": {"token": token, "version": "3.7.13"},
            "job_id": 1,
            "msgs": [{"INFO": "login: Login successful", "SOURCE": "BLL", "ERR_CD": null, "LVL": "INFO"}]
        }),
    )
}

pub(crate) fn zone_success(zone: &str) -> WireResponse {
    json_response(
        200,
        json!({
            "status": "success",
            "data": {"zone": zone, "serial": 2026, "serial_style": "increment"},
            "msgs": []
        }),
    )
}

pub(crate) fn job_incomplete(job_id: u64) -> WireResponse {
    json_response(200, json!({"status": "incomplete", "job_id": job_id}))
}

pub(crate) fn job_success(job_id: u64) -> WireResponse {
    json_response(
        200,
        json!({"status": "success", "job_id": job_id, "data": {}, "msgs": []}),
    )
}

/// The status error the transport produces when the API rejects a stale
/// session token.
pub(crate) fn expiry_rejection() -> TransportError {
    let body = json!({
        "status": "failure",
        "msgs": [{"INFO": "login: Bad or expired credentials", "SOURCE": "BLL", "ERR_CD": "INVALID_DATA", "LVL": "ERROR"}]
    });
    TransportError::Status {
        status: 400,
        message: body.to_string(),
    }
}
