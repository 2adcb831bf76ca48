use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AccountUpdate, AuthenticatedUser};
use crate::features::auth::AuthStore;
use crate::features::users::dtos::{
    ChangePasswordDto, PasswordChangedResponseDto, UpdateProfileDto, UserProfileResponseDto,
};
use crate::features::users::models::ProfileChanges;
use crate::features::users::store::ProfileStore;
use crate::shared::messages;
use crate::shared::validation::ValidationError;
use std::sync::Arc;
use validator::Validate;

/// Service for the current user's profile.
///
/// Display name, email and password belong to the auth store; the phone
/// number is kept in the local profile table.
pub struct UserProfileService {
    auth_store: Arc<dyn AuthStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl UserProfileService {
    pub fn new(auth_store: Arc<dyn AuthStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            auth_store,
            profiles,
        }
    }

    /// Get current user's profile
    pub async fn get_profile(&self, user: &AuthenticatedUser) -> Result<UserProfileResponseDto> {
        let account = self.auth_store.lookup(&user.id_token).await?;
        let stored = self.profiles.find(&account.uid).await?;
        Ok(UserProfileResponseDto::merge(account, stored))
    }

    /// Apply the present fields of `dto`; absent fields are left untouched
    pub async fn update_profile(
        &self,
        user: &AuthenticatedUser,
        dto: UpdateProfileDto,
    ) -> Result<UserProfileResponseDto> {
        dto.validate()?;

        if dto.is_empty() {
            return self.get_profile(user).await;
        }

        let account_update = AccountUpdate {
            display_name: dto.display_name,
            email: dto.email,
            password: None,
        };

        let (account, token) = if account_update.is_empty() {
            (self.auth_store.lookup(&user.id_token).await?, None)
        } else {
            let updated = self
                .auth_store
                .update_account(&user.id_token, account_update)
                .await?;
            (updated.account, updated.id_token)
        };

        let stored = self
            .profiles
            .upsert(
                &account.uid,
                ProfileChanges {
                    display_name: account.display_name.clone(),
                    phone: dto.phone,
                    email: account.email.clone(),
                },
            )
            .await?;

        tracing::info!("Profile updated: uid={}", account.uid);

        let mut response = UserProfileResponseDto::merge(account, Some(stored));
        response.token = token;
        Ok(response)
    }

    /// Change the password after re-authenticating with the current one
    pub async fn change_password(
        &self,
        user: &AuthenticatedUser,
        dto: ChangePasswordDto,
    ) -> Result<PasswordChangedResponseDto> {
        let change = dto.into_change()?;

        let email = match &user.email {
            Some(email) => email.clone(),
            None => self
                .auth_store
                .lookup(&user.id_token)
                .await?
                .email
                .ok_or_else(|| AppError::BadRequest(messages::ACCOUNT_WITHOUT_EMAIL.to_string()))?,
        };

        let session = self
            .auth_store
            .sign_in(&email, &change.current_password)
            .await
            .map_err(|e| match e {
                AppError::Unauthorized(_) => AppError::Validation(ValidationError::single(
                    "currentPassword",
                    messages::CURRENT_PASSWORD_INCORRECT,
                )),
                other => other,
            })?;

        if session.account.uid != user.uid {
            tracing::warn!(
                "Password re-authentication resolved to another account: uid={}",
                user.uid
            );
            return Err(AppError::Unauthorized(messages::INVALID_TOKEN.to_string()));
        }

        let updated = self
            .auth_store
            .update_account(
                &session.id_token,
                AccountUpdate {
                    password: Some(change.new_password),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| match e {
                AppError::Validation(err) if err.has_field("password") => {
                    AppError::Validation(ValidationError::single(
                        "newPassword",
                        messages::NEW_PASSWORD_REJECTED,
                    ))
                }
                other => other,
            })?;

        tracing::info!("Password changed: uid={}", user.uid);

        Ok(PasswordChangedResponseDto {
            token: updated.id_token.or(Some(session.id_token)),
        })
    }
}
