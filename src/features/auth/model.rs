use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity established from a verified bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    /// Raw ID token, forwarded to the auth store for account operations
    #[serde(skip)]
    pub id_token: String,
}

/// Account record as held by the auth store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

/// Result of a successful sign-up or sign-in
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub account: Account,
}

/// Changes pushed to the auth store; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Outcome of an account update. A fresh ID token is issued when the
/// credentials changed.
#[derive(Debug, Clone)]
pub struct AccountUpdated {
    pub account: Account,
    pub id_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}
