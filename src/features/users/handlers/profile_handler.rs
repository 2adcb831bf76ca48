use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    ChangePasswordDto, PasswordChangedResponseDto, UpdateProfileDto, UserProfileResponseDto,
};
use crate::features::users::services::UserProfileService;
use crate::shared::messages;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<UserProfileResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profile",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserProfileService>>,
) -> Result<Json<ApiResponse<UserProfileResponseDto>>> {
    let profile = service.get_profile(&user).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[utoipa::path(
    patch,
    path = "/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<UserProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already registered")
    ),
    tag = "profile",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserProfileService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserProfileResponseDto>>> {
    let profile = service.update_profile(&user, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some(messages::PROFILE_UPDATED.to_string()),
        None,
    )))
}

#[utoipa::path(
    patch,
    path = "/profile/password",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed successfully", body = ApiResponse<PasswordChangedResponseDto>),
        (status = 400, description = "Validation error or wrong current password"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profile",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn change_password(
    user: AuthenticatedUser,
    State(service): State<Arc<UserProfileService>>,
    AppJson(dto): AppJson<ChangePasswordDto>,
) -> Result<Json<ApiResponse<PasswordChangedResponseDto>>> {
    let response = service.change_password(&user, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some(messages::PASSWORD_CHANGED.to_string()),
        None,
    )))
}
