use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::emergency_alerts::models::AlertLocation;
use crate::shared::validation::ValidationError;

/// Request DTO for raising an emergency alert
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAlertDto {
    #[schema(example = "Preciso de ajuda")]
    pub message: Option<String>,

    #[validate(nested)]
    pub location: Option<LocationDto>,
}

/// Where the user was when the alert was raised
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocationDto {
    #[validate(required(message = "A latitude deve ser um número"))]
    #[schema(example = -23.5505)]
    pub latitude: Option<f64>,

    #[validate(required(message = "A longitude deve ser um número"))]
    #[schema(example = -46.6333)]
    pub longitude: Option<f64>,

    #[schema(example = "Av. Paulista, 1000 - São Paulo")]
    pub address: Option<String>,
}

/// Validated alert payload
pub struct AlertRequest {
    pub message: Option<String>,
    pub location: Option<AlertLocation>,
}

impl CreateAlertDto {
    pub fn into_request(self) -> Result<AlertRequest, ValidationError> {
        self.validate()?;
        let location = self.location.and_then(|loc| match (loc.latitude, loc.longitude) {
            (Some(latitude), Some(longitude)) => Some(AlertLocation {
                latitude,
                longitude,
                address: loc.address,
            }),
            _ => None,
        });
        Ok(AlertRequest {
            message: self.message,
            location,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationResponseDto {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Response DTO for an emergency alert
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponseDto {
    pub id: Uuid,
    pub message: Option<String>,
    pub location: Option<LocationResponseDto>,
    /// `active` or `resolved`
    pub status: String,
    /// Active contacts at the time the alert was raised
    pub notified_contacts: i32,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_location_is_valid() {
        let dto = CreateAlertDto {
            message: Some("Preciso de ajuda".to_string()),
            location: None,
        };
        let request = dto.into_request().unwrap();
        assert!(request.location.is_none());
    }

    #[test]
    fn test_empty_payload_is_valid() {
        assert!(CreateAlertDto::default().validate().is_ok());
    }

    #[test]
    fn test_location_requires_coordinates() {
        let dto = CreateAlertDto {
            message: None,
            location: Some(LocationDto {
                latitude: Some(-23.5505),
                longitude: None,
                address: None,
            }),
        };
        let err = ValidationError::from(dto.validate().unwrap_err());
        assert_eq!(
            err.messages_for("location.longitude"),
            vec!["A longitude deve ser um número"]
        );
        assert!(!err.has_field("location.latitude"));
    }

    #[test]
    fn test_location_with_address() {
        let dto = CreateAlertDto {
            message: None,
            location: Some(LocationDto {
                latitude: Some(-23.5505),
                longitude: Some(-46.6333),
                address: Some("Av. Paulista, 1000".to_string()),
            }),
        };
        let location = dto.into_request().unwrap().location.unwrap();
        assert_eq!(location.address.as_deref(), Some("Av. Paulista, 1000"));
        assert_eq!(location.latitude, -23.5505);
    }

    #[test]
    fn test_non_numeric_latitude_fails_to_deserialize() {
        let result = serde_json::from_str::<CreateAlertDto>(
            r#"{"location": {"latitude": "norte", "longitude": -46.6}}"#,
        );
        assert!(result.is_err());
    }
}
