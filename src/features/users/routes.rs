use crate::features::users::handlers;
use crate::features::users::services::UserProfileService;
use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<UserProfileService>) -> Router {
    Router::new()
        .route(
            "/profile",
            get(handlers::get_profile).patch(handlers::update_profile),
        )
        .route("/profile/password", patch(handlers::change_password))
        .with_state(service)
}
