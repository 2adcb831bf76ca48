//! Emergency contact routes

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::emergency_contacts::handlers;
use crate::features::emergency_contacts::services::ContactService;

pub fn routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route(
            "/emergency-contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/emergency-contacts/{id}",
            get(handlers::get_contact)
                .patch(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .with_state(service)
}
