use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::emergency_alerts::dtos::{AlertResponseDto, LocationResponseDto};
use crate::shared::constants::ALERT_STATUS_ACTIVE;

/// Database model for an emergency alert
#[derive(Debug, Clone, FromRow)]
pub struct EmergencyAlert {
    pub id: Uuid,
    pub message: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub status: String,
    pub notified_contacts: i32,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl EmergencyAlert {
    pub fn is_active(&self) -> bool {
        self.status == ALERT_STATUS_ACTIVE
    }
}

/// Validated alert ready to be inserted
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub user_id: String,
    pub message: Option<String>,
    pub location: Option<AlertLocation>,
    pub notified_contacts: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

impl From<EmergencyAlert> for AlertResponseDto {
    fn from(a: EmergencyAlert) -> Self {
        let location = match (a.latitude, a.longitude) {
            (Some(latitude), Some(longitude)) => Some(LocationResponseDto {
                latitude,
                longitude,
                address: a.address,
            }),
            _ => None,
        };

        Self {
            id: a.id,
            message: a.message,
            location,
            status: a.status,
            notified_contacts: a.notified_contacts,
            created_at: a.created_at,
            resolved_at: a.resolved_at,
        }
    }
}
