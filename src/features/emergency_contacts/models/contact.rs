use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::emergency_contacts::dtos::ContactResponseDto;

/// Database model for an emergency contact
#[derive(Debug, Clone, FromRow)]
pub struct EmergencyContact {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated contact ready to be inserted
#[derive(Debug, Clone)]
pub struct NewContact {
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub is_active: bool,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ContactChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub relationship: Option<String>,
    pub is_active: Option<bool>,
}

impl From<EmergencyContact> for ContactResponseDto {
    fn from(c: EmergencyContact) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone: c.phone,
            relationship: c.relationship,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
