use dotenv::dotenv;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::ClinicConfig;
use crate::models::booking::SubmissionEnvelope;

// Outbound requests that never complete would otherwise leave the form
// stuck in its submitting state.
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Successful delivery acknowledgment, optionally carrying a
/// human-readable message supplied by the target.
#[derive(Debug, Clone, Default)]
pub struct SubmissionAck {
    pub message: Option<String>,
}

/// Delivery failure: the target was unreachable, returned a non-success
/// status, or rejected the payload. An empty message means the caller
/// should fall back to a generic one.
#[derive(Debug, Clone)]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "target returned HTTP {}: {}", status, self.message),
            None => write!(f, "target unreachable: {}", self.message),
        }
    }
}

impl std::error::Error for TransportError {}

// Network-level failures are surfaced to visitors as a generic message;
// the detail only goes to the log.
fn network_error(err: reqwest::Error) -> TransportError {
    error!("Submission request failed: {}", err);
    TransportError {
        status: err.status().map(|s| s.as_u16()),
        message: String::new(),
    }
}

// Shape of the relay service's JSON response.
#[derive(Debug, Deserialize)]
struct RelayResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

/// Client for the third-party form-relay service, keyed by an access
/// credential from the environment. The relay owns actual email delivery.
pub struct RelayClient {
    client: Client,
    endpoint: String,
    access_key: String,
}

impl RelayClient {
    /// Create a relay client from environment variables.
    pub fn from_env() -> Self {
        dotenv().ok();

        Self::new(
            env::var("RELAY_ENDPOINT").unwrap_or_else(|_| DEFAULT_RELAY_ENDPOINT.to_string()),
            env::var("RELAY_ACCESS_KEY").expect("RELAY_ACCESS_KEY must be set in environment"),
        )
    }

    pub fn new(endpoint: String, access_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(SUBMIT_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            access_key,
        }
    }

    // The relay wire format is the booking payload plus the email-routing
    // fields and the access key.
    fn build_body(&self, envelope: &SubmissionEnvelope) -> Map<String, Value> {
        let mut body = match serde_json::to_value(&envelope.payload) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };

        body.insert("access_key".to_string(), self.access_key.clone().into());
        body.insert("from_name".to_string(), envelope.from_name.clone().into());
        body.insert("subject".to_string(), envelope.subject.clone().into());
        if let Some(reply_to) = &envelope.reply_to {
            body.insert("replyto".to_string(), reply_to.clone().into());
        }
        if let Some(page) = &envelope.page {
            body.insert("page".to_string(), page.clone().into());
        }
        if let Some(user_agent) = &envelope.user_agent {
            body.insert("userAgent".to_string(), user_agent.clone().into());
        }

        body
    }

    pub async fn submit(
        &self,
        envelope: &SubmissionEnvelope,
    ) -> Result<SubmissionAck, TransportError> {
        let body = self.build_body(envelope);

        info!("Forwarding booking submission to relay");
        debug!("Relay endpoint: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        info!("Relay responded with status: {}", status);

        let relay: RelayResponse = response.json().await.map_err(network_error)?;

        if status.is_success() && relay.success {
            Ok(SubmissionAck {
                message: (!relay.message.is_empty()).then(|| relay.message),
            })
        } else {
            Err(TransportError {
                status: Some(status.as_u16()),
                message: relay.message,
            })
        }
    }
}

/// Direct HTTP target: the booking payload is POSTed as JSON to the
/// configured URL. Any 2xx is success; anything else fails with the
/// response body as the message.
pub struct DirectPostClient {
    client: Client,
    url: String,
}

impl DirectPostClient {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(SUBMIT_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            url,
        }
    }

    pub async fn submit(
        &self,
        envelope: &SubmissionEnvelope,
    ) -> Result<SubmissionAck, TransportError> {
        info!("Posting booking submission to configured endpoint");
        debug!("Submit URL: {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&envelope.payload)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        info!("Endpoint responded with status: {}", status);

        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            let trimmed = body.trim();
            Ok(SubmissionAck {
                message: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            })
        } else {
            Err(TransportError {
                status: Some(status.as_u16()),
                message: body.trim().to_string(),
            })
        }
    }
}

/// The collaborator that actually delivers a booking submission.
///
/// Selected exactly once from configuration: an empty `submitUrl` means
/// the relay, a non-empty one means a direct POST. Only one of the two is
/// ever asked to send for a given deployment.
pub enum SubmissionTarget {
    Relay(RelayClient),
    DirectPost(DirectPostClient),
    #[cfg(test)]
    Mock(crate::target_mock::MockTarget),
}

impl SubmissionTarget {
    pub fn from_config(config: &ClinicConfig) -> Self {
        let submit_url = config.booking_form.submit_url.trim();
        if submit_url.is_empty() {
            info!("Booking submissions will go through the form relay");
            SubmissionTarget::Relay(RelayClient::from_env())
        } else {
            info!("Booking submissions will POST directly to {}", submit_url);
            SubmissionTarget::DirectPost(DirectPostClient::new(submit_url.to_string()))
        }
    }

    pub async fn submit(
        &self,
        envelope: &SubmissionEnvelope,
    ) -> Result<SubmissionAck, TransportError> {
        match self {
            SubmissionTarget::Relay(client) => client.submit(envelope).await,
            SubmissionTarget::DirectPost(client) => client.submit(envelope).await,
            #[cfg(test)]
            SubmissionTarget::Mock(mock) => mock.submit(envelope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingPayload;

    fn sample_envelope() -> SubmissionEnvelope {
        SubmissionEnvelope {
            payload: BookingPayload {
                first_name: Some("Jane".to_string()),
                email: Some("jane@example.com".to_string()),
                household_size: Some(3),
                submitted_at: "2025-01-01T00:00:00+00:00".to_string(),
                ..Default::default()
            },
            reply_to: Some("jane@example.com".to_string()),
            from_name: "Jane".to_string(),
            subject: "New Booking - Lice Treatment Center".to_string(),
            page: Some("https://example.com/".to_string()),
            user_agent: Some("test-agent".to_string()),
        }
    }

    #[test]
    fn test_relay_body_contains_routing_fields() {
        let client = RelayClient::new(
            "https://relay.example.com/submit".to_string(),
            "key-123".to_string(),
        );
        let body = client.build_body(&sample_envelope());

        assert_eq!(body["access_key"], "key-123");
        assert_eq!(body["replyto"], "jane@example.com");
        assert_eq!(body["from_name"], "Jane");
        assert_eq!(body["subject"], "New Booking - Lice Treatment Center");
        assert_eq!(body["page"], "https://example.com/");
        assert_eq!(body["userAgent"], "test-agent");
        // Payload fields are flattened into the same object
        assert_eq!(body["firstName"], "Jane");
        assert_eq!(body["householdSize"], 3);
        // Disabled/empty fields are absent rather than null
        assert!(!body.contains_key("lastName"));
        assert!(!body.contains_key("notes"));
    }

    #[test]
    fn test_direct_post_payload_has_no_routing_fields() {
        let envelope = sample_envelope();
        let json = serde_json::to_value(&envelope.payload).unwrap();

        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["submittedAt"], "2025-01-01T00:00:00+00:00");
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("replyto"));
        assert!(!object.contains_key("from_name"));
        assert!(!object.contains_key("access_key"));
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError {
            status: Some(500),
            message: "Internal error".to_string(),
        };
        assert_eq!(err.to_string(), "target returned HTTP 500: Internal error");

        let err = TransportError {
            status: None,
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().starts_with("target unreachable"));
    }
}
