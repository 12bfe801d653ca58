use axum::{
    extract::{Json as ExtractJson, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::config::ClinicConfig;
use crate::models::booking::{BookingRequest, BookingResponse, SubmissionMeta};
use crate::services::booking::{
    BookingError, BookingForm, Notify, DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE,
};
use crate::target::SubmissionTarget;

// AppState struct containing shared resources
pub struct AppState {
    pub config: Arc<ClinicConfig>,
    pub target: SubmissionTarget,
}

// Collects the single outcome notification so it can be returned as the
// endpoint's JSON body. The page script renders it as a toast.
#[derive(Default)]
struct CollectingNotifier {
    message: Mutex<Option<String>>,
}

impl CollectingNotifier {
    fn take(&self) -> Option<String> {
        self.message.lock().unwrap().take()
    }
}

impl Notify for CollectingNotifier {
    fn success(&self, message: &str) {
        *self.message.lock().unwrap() = Some(message.to_string());
    }

    fn failure(&self, message: &str) {
        *self.message.lock().unwrap() = Some(message.to_string());
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// Booking submission endpoint
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ExtractJson(request): ExtractJson<BookingRequest>,
) -> (StatusCode, Json<BookingResponse>) {
    info!("Received booking submission");

    // Honeypot tripped: answer like a success but never dispatch.
    if request
        .botcheck
        .as_deref()
        .is_some_and(|v| !v.trim().is_empty())
    {
        warn!("Dropping booking submission that filled the honeypot field");
        return (
            StatusCode::OK,
            Json(BookingResponse {
                success: true,
                message: DEFAULT_SUCCESS_MESSAGE.to_string(),
                missing_fields: None,
            }),
        );
    }

    let meta = SubmissionMeta {
        page: header_value(&headers, header::REFERER),
        user_agent: header_value(&headers, header::USER_AGENT),
    };

    let mut form = BookingForm::new(Arc::clone(&state.config));
    for (field, value) in request.into_fields() {
        if form.set_field(field, value).is_err() {
            // Known field name, but not enabled for this deployment.
            debug!("Ignoring value for disabled field '{}'", field);
        }
    }

    let notifier = CollectingNotifier::default();
    let result = form.submit(&state.target, &notifier, &meta).await;

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(BookingResponse {
                success: true,
                message: notifier
                    .take()
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
                missing_fields: None,
            }),
        ),
        Err(BookingError::Validation { missing }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(BookingResponse {
                success: false,
                message: notifier
                    .take()
                    .unwrap_or_else(|| "Please fill in all required fields.".to_string()),
                missing_fields: Some(missing.iter().map(|f| f.as_str().to_string()).collect()),
            }),
        ),
        Err(BookingError::Transport(err)) => {
            warn!("Booking submission failed: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(BookingResponse {
                    success: false,
                    message: notifier
                        .take()
                        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
                    missing_fields: None,
                }),
            )
        }
        Err(err) => {
            warn!("Booking submission rejected: {}", err);
            (
                StatusCode::BAD_REQUEST,
                Json(BookingResponse {
                    success: false,
                    message: DEFAULT_FAILURE_MESSAGE.to_string(),
                    missing_fields: None,
                }),
            )
        }
    }
}
