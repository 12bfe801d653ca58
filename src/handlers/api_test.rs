#[cfg(test)]
mod api_tests {
    use axum_test::{TestServer, TestServerConfig};
    use serde_json::json;
    use std::sync::Arc;

    use crate::config::ClinicConfig;
    use crate::handlers::api::AppState;
    use crate::models::booking::BookingResponse;
    use crate::routes::create_router;
    use crate::target::SubmissionTarget;
    use crate::target_mock::{failing_target, succeeding_target, succeeding_target_with_message};

    fn test_config() -> Arc<ClinicConfig> {
        Arc::new(
            serde_json::from_str(
                r#"{
                    "clinicName": "Lice Treatment Center",
                    "phone": "(555) 123-4567",
                    "email": "info@licetreatment.com",
                    "mainArea": "Downtown",
                    "areasServed": ["Downtown", "Northside"],
                    "locations": [
                        { "name": "Main Location", "address": "123 Main Street" }
                    ],
                    "heroStats": { "yearsInBusiness": 8, "patientsHelped": 400000 },
                    "bookingForm": {
                        "fields": ["firstName", "lastName", "email", "phone", "location", "date", "householdSize"],
                        "submitUrl": "",
                        "requiresLocation": true
                    },
                    "legal": { "privacy": { "effectiveDate": "2025-08-29" } }
                }"#,
            )
            .unwrap(),
        )
    }

    // Helper function to set up a test server with a mock submission target
    fn setup_test_server(
        target: SubmissionTarget,
        is_production: bool,
    ) -> TestServer {
        let app_state = Arc::new(AppState {
            config: test_config(),
            target,
        });
        let router = create_router(app_state, is_production);

        let config = TestServerConfig::builder().mock_transport().build();
        TestServer::new_with_config(router, config).unwrap()
    }

    fn complete_booking() -> serde_json::Value {
        json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "phone": "(555) 987-6543",
            "location": "Downtown",
            "date": "2025-09-15",
            "householdSize": "3"
        })
    }

    #[tokio::test]
    async fn test_successful_booking_submission() {
        let (target, store) = succeeding_target();
        let server = setup_test_server(target, false);

        let response = server.post("/api/booking").json(&complete_booking()).await;

        assert_eq!(response.status_code(), 200);
        let body: BookingResponse = response.json();
        assert!(body.success);
        assert!(!body.message.is_empty());
        assert!(body.missing_fields.is_none());
        assert_eq!(store.delivery_count(), 1);

        let envelope = store.last_envelope().unwrap();
        assert_eq!(envelope.payload.first_name.as_deref(), Some("Jane"));
        assert_eq!(envelope.payload.household_size, Some(3));
    }

    #[tokio::test]
    async fn test_server_supplied_success_message_is_returned() {
        let (target, _store) = succeeding_target_with_message("Thanks, we got it!");
        let server = setup_test_server(target, false);

        let response = server.post("/api/booking").json(&complete_booking()).await;

        assert_eq!(response.status_code(), 200);
        let body: BookingResponse = response.json();
        assert_eq!(body.message, "Thanks, we got it!");
    }

    #[tokio::test]
    async fn test_missing_required_fields_are_named() {
        let (target, store) = succeeding_target();
        let server = setup_test_server(target, false);

        let response = server
            .post("/api/booking")
            .json(&json!({
                "firstName": "Jane",
                "date": "2025-09-15"
            }))
            .await;

        assert_eq!(response.status_code(), 422);
        let body: BookingResponse = response.json();
        assert!(!body.success);
        let missing = body.missing_fields.unwrap();
        assert!(missing.contains(&"lastName".to_string()));
        assert!(missing.contains(&"email".to_string()));
        assert!(missing.contains(&"location".to_string()));
        // No network call was made
        assert_eq!(store.delivery_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_server_message() {
        let (target, store) = failing_target(500, "Internal error");
        let server = setup_test_server(target, false);

        let response = server.post("/api/booking").json(&complete_booking()).await;

        assert_eq!(response.status_code(), 502);
        let body: BookingResponse = response.json();
        assert!(!body.success);
        assert!(body.message.contains("Internal error"));
        assert_eq!(store.delivery_count(), 1);
    }

    #[tokio::test]
    async fn test_honeypot_short_circuits_to_fake_success() {
        let (target, store) = succeeding_target();
        let server = setup_test_server(target, false);

        let mut payload = complete_booking();
        payload["botcheck"] = json!("I am a robot");
        let response = server.post("/api/booking").json(&payload).await;

        assert_eq!(response.status_code(), 200);
        let body: BookingResponse = response.json();
        assert!(body.success);
        assert_eq!(store.delivery_count(), 0);
    }

    #[tokio::test]
    async fn test_numeric_household_size_is_accepted() {
        let (target, store) = succeeding_target();
        let server = setup_test_server(target, false);

        let mut payload = complete_booking();
        payload["householdSize"] = json!(4);
        let response = server.post("/api/booking").json(&payload).await;

        assert_eq!(response.status_code(), 200);
        assert_eq!(
            store.last_envelope().unwrap().payload.household_size,
            Some(4)
        );
    }

    #[tokio::test]
    async fn test_referer_and_user_agent_flow_into_envelope() {
        let (target, store) = succeeding_target();
        let server = setup_test_server(target, false);

        let response = server
            .post("/api/booking")
            .add_header(
                axum::http::header::REFERER,
                axum::http::HeaderValue::from_static("https://clinic.example.com/"),
            )
            .add_header(
                axum::http::header::USER_AGENT,
                axum::http::HeaderValue::from_static("test-agent"),
            )
            .json(&complete_booking())
            .await;

        assert_eq!(response.status_code(), 200);
        let envelope = store.last_envelope().unwrap();
        assert_eq!(envelope.page.as_deref(), Some("https://clinic.example.com/"));
        assert_eq!(envelope.user_agent.as_deref(), Some("test-agent"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (target, _store) = succeeding_target();
        let server = setup_test_server(target, false);

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_pages_are_served() {
        let (target, _store) = succeeding_target();
        let server = setup_test_server(target, false);

        let home = server.get("/").await;
        assert_eq!(home.status_code(), 200);
        assert!(home.text().contains("Lice Treatment Center"));

        let privacy = server.get("/privacy").await;
        assert_eq!(privacy.status_code(), 200);
        assert!(privacy.text().contains("Privacy Policy"));
    }

    #[tokio::test]
    async fn test_sample_endpoint_only_in_development() {
        let (target, _store) = succeeding_target();
        let server = setup_test_server(target, false);
        assert_eq!(server.get("/api/booking/sample").await.status_code(), 200);

        let (target, _store) = succeeding_target();
        let server = setup_test_server(target, true);
        assert_eq!(server.get("/api/booking/sample").await.status_code(), 404);
    }
}
