//! User profile management feature.
//!
//! Display name and email live in the auth store; the phone number is kept
//! in `user_profiles`. Password changes re-authenticate with the current
//! password before the new one is pushed to the auth store.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/profile` | Current profile |
//! | PATCH | `/profile` | Update display name, phone, email |
//! | PATCH | `/profile/password` | Change password |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::UserProfileService;
pub use store::{PgProfileStore, ProfileStore};
