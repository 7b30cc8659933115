//! In-process transports for unit tests.

use super::{Payload, RawResponse, Transport};
use crate::error::TransportError;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Answers every request with the same canned outcome and records the last one.
pub(crate) struct StubTransport {
    outcome: Result<RawResponse, TransportError>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, Payload)>>,
}

impl StubTransport {
    pub(crate) fn respond(response: RawResponse) -> Self {
        Self {
            outcome: Ok(response),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub(crate) fn ok(body: Value) -> Self {
        Self::respond(RawResponse::new(200, body.to_string()))
    }

    pub(crate) fn fail(err: TransportError) -> Self {
        Self {
            outcome: Err(err),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_path(&self) -> Option<String> {
        self.last.lock().as_ref().map(|(path, _)| path.clone())
    }

    pub(crate) fn last_payload(&self) -> Option<Payload> {
        self.last.lock().as_ref().map(|(_, payload)| payload.clone())
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, path: &str, payload: Payload) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some((path.to_string(), payload));
        self.outcome.clone()
    }
}

/// Holds every request until [`release`](Self::release) is called.
pub(crate) struct GatedTransport {
    response: RawResponse,
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedTransport {
    pub(crate) fn new(response: RawResponse) -> Self {
        Self {
            response,
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn release(&self) {
        self.gate.notify_one();
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, _path: &str, _payload: Payload) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.response.clone())
    }
}
