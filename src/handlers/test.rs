use axum::response::Json;
use serde::Serialize;

use crate::models::booking::BookingRequest;

// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

// Sample payloads for exercising the booking endpoint by hand
#[derive(Debug, Serialize)]
pub struct SampleBookingResponse {
    pub complete_example: BookingRequest,
    pub missing_required_example: BookingRequest,
    pub booking_endpoint: String,
}

// Test endpoint that returns sample booking submissions (dev mode only)
pub async fn sample_booking() -> Json<SampleBookingResponse> {
    let complete = BookingRequest {
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        email: Some("jane@example.com".to_string()),
        phone: Some("(555) 987-6543".to_string()),
        location: Some("Downtown".to_string()),
        date: Some("2025-09-15".to_string()),
        household_size: Some("3".to_string()),
        ..Default::default()
    };

    let missing_required = BookingRequest {
        first_name: Some("Jane".to_string()),
        date: Some("2025-09-15".to_string()),
        ..Default::default()
    };

    Json(SampleBookingResponse {
        complete_example: complete,
        missing_required_example: missing_required,
        booking_endpoint: "/api/booking".to_string(),
    })
}
