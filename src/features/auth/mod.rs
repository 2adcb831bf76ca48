//! Authentication feature.
//!
//! Credentials and tokens are owned by an external auth store (the identity
//! provider); this feature validates payloads, forwards them, and verifies
//! the ID tokens the provider issues.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/auth/register` | No | Create account, returns token + user |
//! | POST | `/auth/login` | No | Email/password login |
//! | GET | `/auth/me` | Yes | Identity behind the bearer token |

mod jwks;
mod validator;

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;
pub mod store;

pub use jwks::JwksClient;
pub use store::AuthStore;
pub use validator::JwtValidator;
