use axum::{
    body::{Body, Bytes},
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::messages;
use crate::shared::validation::{FieldError, ValidationError};

/// Upper bound on wrong-typed fields reported for a single payload
const MAX_TYPE_ERRORS: usize = 32;

/// Custom JSON extractor that provides consistent error responses
///
/// A field of the wrong JSON type is reported against its path, and the
/// payload's remaining field rules are still evaluated so one bad field does
/// not hide the others.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(AppError::BadRequest(
                messages::MISSING_JSON_CONTENT_TYPE.to_string(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(err)) => {
                let detail = err.body_text();
                tracing::debug!("Rejected JSON payload: {}", detail);
                Err(AppError::Validation(type_mismatch_errors::<T>(&bytes, detail)))
            }
            Err(JsonRejection::JsonSyntaxError(_)) => Err(AppError::Validation(
                ValidationError::single("body", messages::INVALID_JSON),
            )),
            Err(other) => Err(AppError::BadRequest(other.body_text())),
        }
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Report every wrong-typed field, then run the field rules on what is left.
///
/// Each offending path is dropped from the document and deserialization is
/// retried; rule violations on a field already reported as wrong-typed are
/// not repeated.
fn type_mismatch_errors<T>(bytes: &[u8], first_detail: String) -> ValidationError
where
    T: DeserializeOwned + Validate,
{
    let mut document: Value = match serde_json::from_slice(bytes) {
        Ok(document) => document,
        Err(_) => return ValidationError::single("body", messages::INVALID_JSON),
    };

    let mut errors = Vec::new();
    let mut detail = first_detail;

    for _ in 0..MAX_TYPE_ERRORS {
        let field = field_from_data_error(&detail);
        let removed = field != "body" && remove_path(&mut document, &field);
        errors.push(FieldError::new(field, messages::INVALID_FIELD_TYPE));
        if !removed {
            break;
        }

        let retry = match serde_json::to_vec(&document) {
            Ok(retry) => retry,
            Err(_) => break,
        };

        match Json::<T>::from_bytes(&retry) {
            Ok(Json(value)) => {
                if let Err(rule_errors) = value.validate() {
                    let mistyped: Vec<String> = errors.iter().map(|e| e.field.clone()).collect();
                    errors.extend(
                        ValidationError::from(rule_errors)
                            .errors
                            .into_iter()
                            .filter(|e| !mistyped.contains(&e.field)),
                    );
                }
                break;
            }
            Err(JsonRejection::JsonDataError(err)) => detail = err.body_text(),
            Err(_) => break,
        }
    }

    ValidationError { errors }
}

/// Remove the value at a dotted object path; array paths are left alone.
fn remove_path(document: &mut Value, path: &str) -> bool {
    if path.contains('[') {
        return false;
    }

    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return false;
    };

    let mut current = document;
    for segment in segments {
        match current.get_mut(segment) {
            Some(next) => current = next,
            None => return false,
        }
    }

    current
        .as_object_mut()
        .map(|object| object.remove(last).is_some())
        .unwrap_or(false)
}

/// Pull the offending field path out of a deserialization rejection.
///
/// Rejection text reads `"<preamble>: <path>: <serde message>"`; when no
/// path is present the whole body is blamed.
fn field_from_data_error(detail: &str) -> String {
    let mut parts = detail.splitn(3, ": ");
    let _preamble = parts.next();
    match (parts.next(), parts.next()) {
        (Some(path), Some(_))
            if !path.is_empty()
                && path
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '[' || c == ']') =>
        {
            path.to_string()
        }
        _ => "body".to_string(),
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(messages::AUTH_REQUIRED.to_string()))
    }
}
