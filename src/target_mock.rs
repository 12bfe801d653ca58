use std::sync::{Arc, Mutex};

use crate::models::booking::SubmissionEnvelope;
use crate::target::{SubmissionAck, SubmissionTarget, TransportError};

// A simple in-memory store recording every envelope the mock target was
// asked to deliver, so tests can assert on dispatch counts and payloads.
#[derive(Default)]
pub struct MockDeliveryStore {
    envelopes: Mutex<Vec<SubmissionEnvelope>>,
}

impl MockDeliveryStore {
    pub fn record(&self, envelope: SubmissionEnvelope) {
        self.envelopes.lock().unwrap().push(envelope);
    }

    pub fn delivery_count(&self) -> usize {
        self.envelopes.lock().unwrap().len()
    }

    pub fn last_envelope(&self) -> Option<SubmissionEnvelope> {
        self.envelopes.lock().unwrap().last().cloned()
    }
}

/// Scripted submission target for tests: records every call and returns a
/// pre-configured outcome.
pub struct MockTarget {
    store: Arc<MockDeliveryStore>,
    outcome: Result<SubmissionAck, TransportError>,
}

impl MockTarget {
    pub fn submit(
        &self,
        envelope: &SubmissionEnvelope,
    ) -> Result<SubmissionAck, TransportError> {
        self.store.record(envelope.clone());
        self.outcome.clone()
    }
}

// Helper to set up a mock target with a predefined outcome, returning the
// shared store for later assertions.
fn mock_target(
    outcome: Result<SubmissionAck, TransportError>,
) -> (SubmissionTarget, Arc<MockDeliveryStore>) {
    let store = Arc::new(MockDeliveryStore::default());
    let target = SubmissionTarget::Mock(MockTarget {
        store: Arc::clone(&store),
        outcome,
    });
    (target, store)
}

/// Mock target that always succeeds, with no server-supplied message.
pub fn succeeding_target() -> (SubmissionTarget, Arc<MockDeliveryStore>) {
    mock_target(Ok(SubmissionAck::default()))
}

/// Mock target that always succeeds with the given message.
pub fn succeeding_target_with_message(
    message: &str,
) -> (SubmissionTarget, Arc<MockDeliveryStore>) {
    mock_target(Ok(SubmissionAck {
        message: Some(message.to_string()),
    }))
}

/// Mock target that always fails with the given status and message.
pub fn failing_target(
    status: u16,
    message: &str,
) -> (SubmissionTarget, Arc<MockDeliveryStore>) {
    mock_target(Err(TransportError {
        status: Some(status),
        message: message.to_string(),
    }))
}
