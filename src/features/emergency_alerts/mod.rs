//! Emergency alerts raised by the authenticated user.
//!
//! Raising an alert records it with an optional message and location and
//! counts the user's active emergency contacts as notified.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/emergency-alerts` | Raise alert |
//! | GET | `/emergency-alerts` | Alert history |
//! | PATCH | `/emergency-alerts/{id}/resolve` | Resolve alert |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::AlertService;
pub use store::{AlertStore, PgAlertStore};
