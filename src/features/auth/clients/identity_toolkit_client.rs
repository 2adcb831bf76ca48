use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::config::IdentityProviderConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Account, AccountUpdate, AccountUpdated, AuthSession};
use crate::features::auth::store::AuthStore;
use crate::shared::messages;
use crate::shared::validation::ValidationError;

/// Email/password request for sign-up and sign-in
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    return_secure_token: bool,
}

/// Session payload returned by sign-up, sign-in and update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Seconds, encoded as a decimal string
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    disabled: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Auth store backed by the Identity Toolkit REST API
pub struct IdentityToolkitClient {
    config: IdentityProviderConfig,
    http_client: reqwest::Client,
}

impl IdentityToolkitClient {
    pub fn new(config: IdentityProviderConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/accounts:{}", self.config.base_url, method);

        tracing::debug!("Calling identity provider: accounts:{}", method);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider request failed: {}", e);
                AppError::ExternalServiceError(format!("accounts:{} request failed: {}", method, e))
            })?;

        let status = response.status();

        if status.is_success() {
            return response.json::<R>().await.map_err(|e| {
                tracing::error!("Failed to parse identity provider response: {}", e);
                AppError::ExternalServiceError(format!(
                    "Failed to parse accounts:{} response: {}",
                    method, e
                ))
            });
        }

        let body = response.text().await.unwrap_or_default();
        let code = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_default();

        tracing::warn!(
            "Identity provider rejected accounts:{}: HTTP {} - {}",
            method,
            status,
            code
        );

        Err(map_provider_error(&code, status.as_u16()))
    }
}

/// Translate a provider error code (e.g. `"EMAIL_EXISTS"`,
/// `"WEAK_PASSWORD : Password should be ..."`) into an application error.
fn map_provider_error(message: &str, status: u16) -> AppError {
    let code = message.split([' ', ':']).next().unwrap_or_default();

    match code {
        "EMAIL_EXISTS" => AppError::Conflict(messages::EMAIL_ALREADY_REGISTERED.to_string()),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AppError::Unauthorized(messages::INVALID_CREDENTIALS.to_string())
        }
        "USER_DISABLED" => AppError::Forbidden(messages::ACCOUNT_DISABLED.to_string()),
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_NOT_FOUND" | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => {
            AppError::Unauthorized(messages::INVALID_TOKEN.to_string())
        }
        "INVALID_EMAIL" => AppError::Validation(ValidationError::single(
            "email",
            messages::EMAIL_INVALID,
        )),
        "WEAK_PASSWORD" => AppError::Validation(ValidationError::single(
            "password",
            messages::PASSWORD_LENGTH,
        )),
        _ => AppError::ExternalServiceError(format!(
            "Identity provider error: HTTP {} {}",
            status, message
        )),
    }
}

impl SessionResponse {
    fn into_session(self) -> Result<AuthSession> {
        let id_token = self.id_token.ok_or_else(|| {
            AppError::ExternalServiceError("Identity provider returned no ID token".to_string())
        })?;

        Ok(AuthSession {
            id_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in.and_then(|s| s.parse().ok()),
            account: Account {
                uid: self.local_id,
                email: self.email,
                display_name: self.display_name.filter(|n| !n.is_empty()),
                email_verified: self.email_verified,
            },
        })
    }
}

#[async_trait]
impl AuthStore for IdentityToolkitClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let session = self
            .call::<_, SessionResponse>("signUp", &request)
            .await?
            .into_session()?;

        tracing::info!("Account created: uid={}", session.account.uid);
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        self.call::<_, SessionResponse>("signInWithPassword", &request)
            .await?
            .into_session()
    }

    async fn lookup(&self, id_token: &str) -> Result<Account> {
        let response: LookupResponse = self.call("lookup", &LookupRequest { id_token }).await?;

        let user = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Unauthorized(messages::INVALID_TOKEN.to_string()))?;

        if user.disabled {
            return Err(AppError::Forbidden(messages::ACCOUNT_DISABLED.to_string()));
        }

        Ok(Account {
            uid: user.local_id,
            email: user.email,
            display_name: user.display_name.filter(|n| !n.is_empty()),
            email_verified: user.email_verified,
        })
    }

    async fn update_account(
        &self,
        id_token: &str,
        update: AccountUpdate,
    ) -> Result<AccountUpdated> {
        let request = UpdateRequest {
            id_token,
            display_name: update.display_name,
            email: update.email,
            password: update.password,
            return_secure_token: true,
        };
        let response: SessionResponse = self.call("update", &request).await?;

        tracing::info!("Account updated: uid={}", response.local_id);

        Ok(AccountUpdated {
            id_token: response.id_token,
            account: Account {
                uid: response.local_id,
                email: response.email,
                display_name: response.display_name.filter(|n| !n.is_empty()),
                email_verified: response.email_verified,
            },
        })
    }
}
