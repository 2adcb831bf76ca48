use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::Account;
use crate::features::users::models::UserProfile;
use crate::shared::validation::{empty_as_none, ValidationError};

/// Request DTO for updating the current user's profile
///
/// Every field is optional; an empty payload is a valid no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[schema(example = "Maria Silva")]
    pub display_name: Option<String>,

    #[schema(example = "+55 11 91234-5678")]
    pub phone: Option<String>,

    #[validate(email(message = "Informe um e-mail válido"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "maria@example.com")]
    pub email: Option<String>,
}

impl UpdateProfileDto {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

/// Request DTO for changing the current user's password
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    #[validate(required(message = "A senha atual é obrigatória"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(format = "password")]
    pub current_password: Option<String>,

    #[validate(
        required(message = "A nova senha é obrigatória"),
        length(min = 8, message = "A nova senha deve ter pelo menos 8 caracteres")
    )]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(format = "password", min_length = 8)]
    pub new_password: Option<String>,
}

/// Validated password change
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordDto {
    pub fn into_change(self) -> Result<PasswordChange, ValidationError> {
        self.validate()?;
        Ok(PasswordChange {
            current_password: self.current_password.unwrap_or_default(),
            new_password: self.new_password.unwrap_or_default(),
        })
    }
}

/// Current user's profile: auth store account merged with stored fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponseDto {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub email_verified: bool,
    /// Replacement ID token, present when the update revoked the previous one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UserProfileResponseDto {
    /// The auth store wins; stored values only fill fields it has no value for
    pub fn merge(account: Account, stored: Option<UserProfile>) -> Self {
        let stored = stored.unwrap_or_default();
        Self {
            uid: account.uid,
            email: account.email.or(stored.email),
            display_name: account.display_name.or(stored.display_name),
            phone: stored.phone,
            email_verified: account.email_verified,
            token: None,
        }
    }
}

/// Response DTO for a password change
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangedResponseDto {
    /// New ID token; the previous one stops being accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::messages;
    use serde_json::json;

    fn password_change(body: serde_json::Value) -> ChangePasswordDto {
        serde_json::from_value(body).unwrap()
    }

    fn errors_of(dto: &impl Validate) -> ValidationError {
        ValidationError::from(dto.validate().unwrap_err())
    }

    #[test]
    fn test_profile_update_all_absent_is_valid() {
        let dto = UpdateProfileDto::default();
        assert!(dto.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_profile_update_rejects_invalid_email() {
        let dto = UpdateProfileDto {
            email: Some("maria-at-example".to_string()),
            ..Default::default()
        };
        let err = errors_of(&dto);
        assert_eq!(err.messages_for("email"), vec![messages::EMAIL_INVALID]);
    }

    #[test]
    fn test_profile_update_empty_email_is_absent() {
        let dto: UpdateProfileDto = serde_json::from_value(json!({ "email": "" })).unwrap();
        assert!(dto.email.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_profile_update_accepts_partial_payload() {
        let dto = UpdateProfileDto {
            phone: Some("+55 11 91234-5678".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_new_password_shorter_than_eight_is_rejected() {
        let dto = password_change(json!({ "currentPassword": "old", "newPassword": "abc1234" }));
        let err = errors_of(&dto);
        assert_eq!(
            err.messages_for("newPassword"),
            vec!["A nova senha deve ter pelo menos 8 caracteres"]
        );
        assert!(!err.has_field("currentPassword"));
    }

    #[test]
    fn test_new_password_has_no_complexity_rules() {
        let letters = password_change(json!({ "currentPassword": "old", "newPassword": "aaaaaaaa" }));
        let digits = password_change(json!({ "currentPassword": "old", "newPassword": "12345678" }));
        assert!(letters.validate().is_ok());
        assert!(digits.validate().is_ok());
    }

    #[test]
    fn test_password_change_requires_both_fields() {
        let err = errors_of(&password_change(json!({ "newPassword": "" })));
        assert_eq!(
            err.messages_for("currentPassword"),
            vec!["A senha atual é obrigatória"]
        );
        assert_eq!(
            err.messages_for("newPassword"),
            vec!["A nova senha é obrigatória"]
        );
    }

    #[test]
    fn test_into_change() {
        let change = password_change(json!({ "currentPassword": "old", "newPassword": "nova-senha" }))
            .into_change()
            .unwrap();
        assert_eq!(change.current_password, "old");
        assert_eq!(change.new_password, "nova-senha");
    }

    #[test]
    fn test_merge_takes_phone_from_stored_profile() {
        let account = Account {
            uid: "u1".to_string(),
            email: Some("maria@example.com".to_string()),
            display_name: Some("Maria".to_string()),
            email_verified: true,
        };
        let dto = UserProfileResponseDto::merge(account.clone(), None);
        assert_eq!(dto.phone, None);
        assert_eq!(dto.display_name.as_deref(), Some("Maria"));

        let stored = UserProfile {
            display_name: Some("Maria Antiga".to_string()),
            phone: Some("+55 11 91234-5678".to_string()),
            email: Some("old@example.com".to_string()),
        };
        let dto = UserProfileResponseDto::merge(account, Some(stored));
        assert_eq!(dto.phone.as_deref(), Some("+55 11 91234-5678"));
        assert_eq!(dto.display_name.as_deref(), Some("Maria"));
        assert_eq!(dto.email.as_deref(), Some("maria@example.com"));
    }

    #[test]
    fn test_merge_falls_back_to_stored_fields() {
        let account = Account {
            uid: "u1".to_string(),
            email: None,
            display_name: None,
            email_verified: false,
        };
        let stored = UserProfile {
            display_name: Some("Maria".to_string()),
            phone: None,
            email: Some("maria@example.com".to_string()),
        };
        let dto = UserProfileResponseDto::merge(account, Some(stored));
        assert_eq!(dto.display_name.as_deref(), Some("Maria"));
        assert_eq!(dto.email.as_deref(), Some("maria@example.com"));
    }
}
