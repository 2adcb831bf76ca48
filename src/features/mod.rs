pub mod auth;
pub mod emergency_alerts;
pub mod emergency_contacts;
pub mod users;
