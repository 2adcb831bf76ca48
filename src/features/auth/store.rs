use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::auth::model::{Account, AccountUpdate, AccountUpdated, AuthSession};

/// External collaborator that owns credentials and issues tokens.
///
/// Implementations translate provider failures into `AppError`:
/// wrong credentials become `Unauthorized`, an already registered email
/// becomes `Conflict`, and transport problems become `ExternalServiceError`.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Create an account and open a session for it
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Verify email/password and open a session
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Fetch the account behind an ID token
    async fn lookup(&self, id_token: &str) -> Result<Account>;

    /// Apply `update` to the account behind an ID token
    async fn update_account(&self, id_token: &str, update: AccountUpdate)
        -> Result<AccountUpdated>;
}
