use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::emergency_alerts::dtos::{AlertResponseDto, CreateAlertDto};
use crate::features::emergency_alerts::services::AlertService;
use crate::shared::messages;
use crate::shared::types::{ApiResponse, Meta};

/// Raise an emergency alert
#[utoipa::path(
    post,
    path = "/emergency-alerts",
    request_body = CreateAlertDto,
    responses(
        (status = 201, description = "Alert raised", body = ApiResponse<AlertResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "emergency-alerts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_alert(
    user: AuthenticatedUser,
    State(service): State<Arc<AlertService>>,
    AppJson(dto): AppJson<CreateAlertDto>,
) -> Result<(StatusCode, Json<ApiResponse<AlertResponseDto>>)> {
    let alert = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(alert),
            Some(messages::ALERT_SENT.to_string()),
            None,
        )),
    ))
}

/// Alert history of the current user
#[utoipa::path(
    get,
    path = "/emergency-alerts",
    responses(
        (status = 200, description = "List of alerts, newest first", body = ApiResponse<Vec<AlertResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "emergency-alerts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_alerts(
    user: AuthenticatedUser,
    State(service): State<Arc<AlertService>>,
) -> Result<Json<ApiResponse<Vec<AlertResponseDto>>>> {
    let alerts = service.list(&user).await?;
    let total = alerts.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(alerts),
        None,
        Some(Meta { total }),
    )))
}

/// Mark an alert as resolved
#[utoipa::path(
    patch,
    path = "/emergency-alerts/{id}/resolve",
    params(
        ("id" = Uuid, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Alert resolved", body = ApiResponse<AlertResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Alert not found"),
        (status = 409, description = "Alert already resolved")
    ),
    tag = "emergency-alerts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn resolve_alert(
    user: AuthenticatedUser,
    State(service): State<Arc<AlertService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AlertResponseDto>>> {
    let alert = service.resolve(&user, id).await?;
    Ok(Json(ApiResponse::success(
        Some(alert),
        Some(messages::ALERT_RESOLVED.to_string()),
        None,
    )))
}
