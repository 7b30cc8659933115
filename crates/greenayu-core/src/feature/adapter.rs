//! Shared submission lifecycle for every feature.

use super::{Feature, FeatureKind, Transport};
use crate::error::FeatureError;
use parking_lot::Mutex;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

/// Lifecycle of one adapter.
///
/// `Success` and `Failed` are mutually exclusive; a new submission clears
/// both by moving to `Submitting`.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterState<T> {
    /// Nothing submitted, or the form changed since the last outcome.
    Idle,
    /// A request is in flight.
    Submitting,
    /// Last submission produced a view model.
    Success(T),
    /// Last submission failed.
    Failed(FeatureError),
}

impl<T> AdapterState<T> {
    /// Whether a request is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, AdapterState::Submitting)
    }
}

struct Slot<T> {
    state: AdapterState<T>,
    generation: u64,
}

/// Drives one [`Feature`] against a [`Transport`].
///
/// Single-flight: while a submission is pending, further submissions are
/// rejected with [`FeatureError::Busy`] and leave the slot alone.
pub struct FeatureAdapter<F: Feature> {
    transport: Arc<dyn Transport>,
    slot: Mutex<Slot<F::Output>>,
    _feature: PhantomData<fn() -> F>,
}

impl<F: Feature> FeatureAdapter<F> {
    /// Creates an idle adapter.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            slot: Mutex::new(Slot {
                state: AdapterState::Idle,
                generation: 0,
            }),
            _feature: PhantomData,
        }
    }

    /// The feature this adapter drives.
    pub fn kind(&self) -> FeatureKind {
        F::KIND
    }

    /// Validates, sends and maps one submission.
    ///
    /// The outcome is both returned and stored. If the returned future is
    /// dropped before completion the adapter goes back to `Idle`.
    pub async fn submit(&self, input: &F::Input) -> Result<F::Output, FeatureError> {
        let generation = {
            let mut slot = self.slot.lock();
            if slot.state.is_submitting() {
                warn!(feature = %F::KIND, "Submission rejected, one is already pending");
                return Err(FeatureError::Busy);
            }
            slot.generation += 1;
            slot.state = AdapterState::Submitting;
            slot.generation
        };
        let mut in_flight = InFlight {
            slot: &self.slot,
            armed: true,
        };

        let span = info_span!(
            "feature_submit",
            feature = %F::KIND,
            submission_id = %Uuid::new_v4()
        );
        let outcome = self.run(input).instrument(span).await;

        in_flight.armed = false;
        let mut slot = self.slot.lock();
        if slot.generation == generation {
            slot.state = match &outcome {
                Ok(output) => AdapterState::Success(output.clone()),
                Err(e) => AdapterState::Failed(e.clone()),
            };
        } else {
            debug!(feature = %F::KIND, "Discarding outcome of a reset submission");
            slot.state = AdapterState::Idle;
        }
        outcome
    }

    async fn run(&self, input: &F::Input) -> Result<F::Output, FeatureError> {
        F::validate(input)?;
        let payload = F::payload(input)?;

        debug!(endpoint = F::KIND.endpoint(), "Sending request");
        let response = self.transport.send(F::KIND.endpoint(), payload).await;
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!("Backend unreachable: {}", e);
                return Err(e.into());
            }
        };

        if !response.is_success() {
            warn!(status = response.status, "Backend returned an error status");
            return Err(FeatureError::from_status(response.status, &response.body));
        }

        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| FeatureError::InvalidJson(e.to_string()))?;
        let output = F::map_response(input, &body)?;
        debug!(status = response.status, "Submission succeeded");
        Ok(output)
    }

    /// Returns to `Idle`, dropping any result or error.
    ///
    /// A pending submission stays `Submitting` until its request settles,
    /// so the adapter still rejects new submissions; its outcome is then
    /// discarded and the adapter lands on `Idle`.
    pub fn reset(&self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        if !slot.state.is_submitting() {
            slot.state = AdapterState::Idle;
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AdapterState<F::Output> {
        self.slot.lock().state.clone()
    }

    /// The last successful view model, if the adapter holds one.
    pub fn result(&self) -> Option<F::Output> {
        match &self.slot.lock().state {
            AdapterState::Success(output) => Some(output.clone()),
            _ => None,
        }
    }

    /// The last failure, if the adapter holds one.
    pub fn error(&self) -> Option<FeatureError> {
        match &self.slot.lock().state {
            AdapterState::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }

    /// Whether a request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.slot.lock().state.is_submitting()
    }
}

struct InFlight<'a, T> {
    slot: &'a Mutex<Slot<T>>,
    armed: bool,
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut slot = self.slot.lock();
        if slot.state.is_submitting() {
            slot.state = AdapterState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FeatureErrorKind, TransportError, UNREACHABLE_MESSAGE};
    use crate::feature::testing::{GatedTransport, StubTransport};
    use crate::feature::{Payload, RawResponse};
    use serde_json::json;
    use std::time::Duration;

    /// Minimal feature: posts `{"text": input}` and reads `/value`.
    struct Echo;

    impl Feature for Echo {
        const KIND: FeatureKind = FeatureKind::Fertilizer;
        type Input = String;
        type Output = String;

        fn validate(input: &String) -> Result<(), FeatureError> {
            if input.is_empty() {
                return Err(FeatureError::Validation("Text is required.".into()));
            }
            Ok(())
        }

        fn payload(input: &String) -> Result<Payload, FeatureError> {
            Ok(Payload::Json(json!({ "text": input })))
        }

        fn map_response(_input: &String, body: &Value) -> Result<String, FeatureError> {
            crate::feature::required_str(body, "/value", "value").map(str::to_string)
        }
    }

    fn adapter(transport: StubTransport) -> (FeatureAdapter<Echo>, Arc<StubTransport>) {
        let transport = Arc::new(transport);
        (FeatureAdapter::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn success_stores_result() {
        let (adapter, transport) = adapter(StubTransport::ok(json!({"value": "done"})));

        let output = adapter.submit(&"hello".to_string()).await.unwrap();

        assert_eq!(output, "done");
        assert_eq!(adapter.state(), AdapterState::Success("done".to_string()));
        assert_eq!(adapter.error(), None);
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.last_path().as_deref(), Some("/fertilizer"));
        assert_eq!(
            transport.last_payload(),
            Some(Payload::Json(json!({"text": "hello"})))
        );
    }

    #[tokio::test]
    async fn validation_failure_skips_network() {
        let (adapter, transport) = adapter(StubTransport::ok(json!({"value": "x"})));

        let err = adapter.submit(&String::new()).await.unwrap_err();

        assert_eq!(err.kind(), FeatureErrorKind::Validation);
        assert_eq!(adapter.error(), Some(err));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn status_error_carries_body_text() {
        let (adapter, _) = adapter(StubTransport::respond(RawResponse::new(
            422,
            "Unknown soil type",
        )));

        let err = adapter.submit(&"x".to_string()).await.unwrap_err();

        assert_eq!(
            err,
            FeatureError::Status {
                status: 422,
                message: "Unknown soil type".to_string()
            }
        );
        assert_eq!(adapter.result(), None);
    }

    #[tokio::test]
    async fn empty_status_body_uses_code() {
        let (adapter, _) = adapter(StubTransport::respond(RawResponse::new(503, "")));
        let err = adapter.submit(&"x".to_string()).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed (503)");
    }

    #[tokio::test]
    async fn transport_failure_is_unreachable() {
        let (adapter, _) = adapter(StubTransport::fail(TransportError::Unreachable(
            "connection refused".into(),
        )));

        let err = adapter.submit(&"x".to_string()).await.unwrap_err();

        assert_eq!(err.kind(), FeatureErrorKind::NetworkUnreachable);
        assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let (adapter, _) = adapter(StubTransport::respond(RawResponse::new(200, "<html>")));
        let err = adapter.submit(&"x".to_string()).await.unwrap_err();
        assert_eq!(err.kind(), FeatureErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn missing_field_is_malformed() {
        let (adapter, _) = adapter(StubTransport::ok(json!({"other": 1})));
        let err = adapter.submit(&"x".to_string()).await.unwrap_err();
        assert_eq!(err, FeatureError::missing("value"));
    }

    #[tokio::test]
    async fn new_submission_replaces_previous_outcome() {
        let (adapter, _) = adapter(StubTransport::ok(json!({"value": "ok"})));

        adapter.submit(&String::new()).await.unwrap_err();
        assert!(adapter.error().is_some());

        adapter.submit(&"x".to_string()).await.unwrap();
        assert_eq!(adapter.error(), None);
        assert_eq!(adapter.result(), Some("ok".to_string()));
    }

    #[tokio::test]
    async fn overlapping_submit_is_rejected() {
        let transport = Arc::new(GatedTransport::new(RawResponse::new(
            200,
            r#"{"value":"first"}"#,
        )));
        let adapter = FeatureAdapter::<Echo>::new(transport.clone());
        let input = "x".to_string();

        let (first, second) = tokio::join!(adapter.submit(&input), async {
            assert!(adapter.is_submitting());
            let second = adapter.submit(&input).await;
            assert!(adapter.is_submitting());
            transport.release();
            second
        });

        assert_eq!(second, Err(FeatureError::Busy));
        assert_eq!(first, Ok("first".to_string()));
        assert_eq!(adapter.result(), Some("first".to_string()));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn dropped_submission_returns_to_idle() {
        let transport = Arc::new(GatedTransport::new(RawResponse::new(
            200,
            r#"{"value":"late"}"#,
        )));
        let adapter = FeatureAdapter::<Echo>::new(transport);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), adapter.submit(&"x".to_string()))
                .await;

        assert!(timed_out.is_err());
        assert_eq!(adapter.state(), AdapterState::Idle);
    }

    #[tokio::test]
    async fn reset_discards_pending_outcome() {
        let transport = Arc::new(GatedTransport::new(RawResponse::new(
            200,
            r#"{"value":"stale"}"#,
        )));
        let adapter = FeatureAdapter::<Echo>::new(transport.clone());

        let input = "x".to_string();
        let (outcome, _) = tokio::join!(adapter.submit(&input), async {
            adapter.reset();
            assert!(adapter.is_submitting());
            transport.release();
        });

        assert_eq!(outcome, Ok("stale".to_string()));
        assert_eq!(adapter.state(), AdapterState::Idle);
        assert_eq!(adapter.result(), None);
    }

    #[tokio::test]
    async fn reset_keeps_pending_request_exclusive() {
        let transport = Arc::new(GatedTransport::new(RawResponse::new(
            200,
            r#"{"value":"first"}"#,
        )));
        let adapter = FeatureAdapter::<Echo>::new(transport.clone());
        let input = "x".to_string();

        let (first, second) = tokio::join!(adapter.submit(&input), async {
            adapter.reset();
            let second = adapter.submit(&input).await;
            transport.release();
            second
        });

        assert_eq!(second, Err(FeatureError::Busy));
        assert_eq!(first, Ok("first".to_string()));
        assert_eq!(transport.calls(), 1);
        assert_eq!(adapter.state(), AdapterState::Idle);

        let transport = Arc::new(StubTransport::ok(json!({"value": "again"})));
        let adapter = FeatureAdapter::<Echo>::new(transport.clone());
        adapter.reset();
        assert_eq!(adapter.submit(&input).await, Ok("again".to_string()));
    }

    #[tokio::test]
    async fn dropped_submission_after_reset_returns_to_idle() {
        let transport = Arc::new(GatedTransport::new(RawResponse::new(
            200,
            r#"{"value":"late"}"#,
        )));
        let adapter = FeatureAdapter::<Echo>::new(transport);

        let timed_out = tokio::time::timeout(Duration::from_millis(20), async {
            let input = "x".to_string();
            let submit = adapter.submit(&input);
            tokio::pin!(submit);
            tokio::select! {
                biased;
                _ = &mut submit => unreachable!("gate is never released"),
                _ = async {
                    adapter.reset();
                    std::future::pending::<()>().await
                } => {}
            }
        })
        .await;

        assert!(timed_out.is_err());
        assert_eq!(adapter.state(), AdapterState::Idle);
    }

    #[tokio::test]
    async fn reset_clears_outcome() {
        let (adapter, _) = adapter(StubTransport::ok(json!({"value": "ok"})));
        adapter.submit(&"x".to_string()).await.unwrap();

        adapter.reset();

        assert_eq!(adapter.state(), AdapterState::Idle);
        assert_eq!(adapter.result(), None);
    }
}
