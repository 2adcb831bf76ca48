use crate::core::error::Result;
use crate::features::auth::dtos::{
    AuthResponseDto, LoginRequestDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::store::AuthStore;
use crate::shared::messages;
use std::sync::Arc;

/// Service for authentication operations (register, login)
pub struct AuthService {
    auth_store: Arc<dyn AuthStore>,
}

impl AuthService {
    pub fn new(auth_store: Arc<dyn AuthStore>) -> Self {
        Self { auth_store }
    }

    /// Register a new user
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let credentials = dto.into_credentials()?;

        let session = self
            .auth_store
            .sign_up(&credentials.email, &credentials.password)
            .await?;

        tracing::info!("User registered: uid={}", session.account.uid);

        Ok(AuthResponseDto::from_session(
            session,
            messages::REGISTER_SUCCESS,
        ))
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let credentials = dto.into_credentials()?;

        let session = self
            .auth_store
            .sign_in(&credentials.email, &credentials.password)
            .await?;

        tracing::info!("User logged in: uid={}", session.account.uid);

        Ok(AuthResponseDto::from_session(session, messages::LOGIN_SUCCESS))
    }

    /// Get current user info (for /me endpoint)
    pub fn current_user(&self, user: AuthenticatedUser) -> MeResponseDto {
        user.into()
    }
}
