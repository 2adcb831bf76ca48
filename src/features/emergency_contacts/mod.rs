//! Emergency contacts of the authenticated user.
//!
//! Active contacts are the ones counted as notified when the user raises an
//! emergency alert.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/emergency-contacts` | Add contact |
//! | GET | `/emergency-contacts` | List contacts |
//! | GET | `/emergency-contacts/{id}` | Get contact |
//! | PATCH | `/emergency-contacts/{id}` | Edit contact |
//! | DELETE | `/emergency-contacts/{id}` | Remove contact |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::ContactService;
pub use store::{ContactStore, PgContactStore};
