//! Emergency alert routes

use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::emergency_alerts::handlers;
use crate::features::emergency_alerts::services::AlertService;

pub fn routes(service: Arc<AlertService>) -> Router {
    Router::new()
        .route(
            "/emergency-alerts",
            get(handlers::list_alerts).post(handlers::create_alert),
        )
        .route(
            "/emergency-alerts/{id}/resolve",
            patch(handlers::resolve_alert),
        )
        .with_state(service)
}
