use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::emergency_contacts::models::{ContactChanges, NewContact};
use crate::shared::validation::{empty_as_none, ValidationError};

/// Request DTO for adding an emergency contact
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactDto {
    #[validate(required(message = "O nome do contato é obrigatório"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "Ana Souza")]
    pub name: Option<String>,

    #[validate(required(message = "O telefone do contato é obrigatório"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "+55 11 98765-4321")]
    pub phone: Option<String>,

    #[validate(required(message = "O grau de parentesco é obrigatório"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "Irmã")]
    pub relationship: Option<String>,

    /// Defaults to `true` when omitted
    pub is_active: Option<bool>,
}

impl CreateContactDto {
    pub fn into_new_contact(self, user_id: &str) -> Result<NewContact, ValidationError> {
        self.validate()?;
        Ok(NewContact {
            user_id: user_id.to_string(),
            name: self.name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            relationship: self.relationship.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Request DTO for editing an emergency contact
///
/// Fields are optional, but a field that is sent must not be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactDto {
    #[validate(length(min = 1, message = "O nome do contato é obrigatório"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "O telefone do contato é obrigatório"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "O grau de parentesco é obrigatório"))]
    pub relationship: Option<String>,

    pub is_active: Option<bool>,
}

impl UpdateContactDto {
    pub fn into_changes(self) -> Result<ContactChanges, ValidationError> {
        self.validate()?;
        Ok(ContactChanges {
            name: self.name,
            phone: self.phone,
            relationship: self.relationship,
            is_active: self.is_active,
        })
    }
}

/// Response DTO for an emergency contact
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponseDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub relationship: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
