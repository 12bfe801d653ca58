use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::api::{submit_booking, AppState};
use crate::handlers::test::{health_check, sample_booking};
use crate::pages::{home::get_home, privacy::get_privacy};

pub fn create_router(app_state: Arc<AppState>, is_production: bool) -> Router {
    let mut router = Router::new();

    // Health check is always available
    let health_route = Router::new().route("/health", get(health_check));
    router = router.merge(health_route);

    // Site pages and the booking endpoint are always available
    let site_routes = Router::new()
        .route("/", get(get_home))
        .route("/privacy", get(get_privacy))
        .route("/api/booking", post(submit_booking));
    router = router.merge(site_routes);

    // Only expose the sample-payload endpoint outside production
    if !is_production {
        router = router.merge(
            Router::new().route("/api/booking/sample", get(sample_booking)),
        );
        info!("Sample booking endpoint enabled - server running in development mode");
    } else {
        info!("Running in production mode - only site, booking and health endpoints exposed");
    }

    router.with_state(app_state)
}
