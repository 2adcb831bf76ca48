use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::{Account, AuthSession, AuthenticatedUser};
use crate::shared::validation::{empty_as_none, ValidationError};

/// Request DTO for user registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(
        required(message = "O e-mail é obrigatório"),
        email(message = "Informe um e-mail válido")
    )]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "maria@example.com")]
    pub email: Option<String>,

    #[validate(
        required(message = "A senha é obrigatória"),
        length(min = 8, max = 50, message = "A senha deve ter entre 8 e 50 caracteres"),
        custom(function = "crate::shared::validation::has_uppercase"),
        custom(function = "crate::shared::validation::has_lowercase"),
        custom(function = "crate::shared::validation::has_digit"),
        custom(function = "crate::shared::validation::has_special_char")
    )]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "Sobr1edade!", format = "password")]
    pub password: Option<String>,
}

/// Request DTO for user login
///
/// Only presence is checked on the password; complexity is a registration rule.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(
        required(message = "O e-mail é obrigatório"),
        email(message = "Informe um e-mail válido")
    )]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "maria@example.com")]
    pub email: Option<String>,

    #[validate(required(message = "A senha é obrigatória"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    #[schema(example = "Sobr1edade!", format = "password")]
    pub password: Option<String>,
}

/// Credentials after validation has guaranteed both fields are present
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl RegisterRequestDto {
    pub fn into_credentials(self) -> Result<Credentials, ValidationError> {
        self.validate()?;
        Ok(Credentials {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

impl LoginRequestDto {
    pub fn into_credentials(self) -> Result<Credentials, ValidationError> {
        self.validate()?;
        Ok(Credentials {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Response DTO for authentication (register/login)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    /// ID token to send as `Authorization: Bearer <token>`
    pub token: String,
    /// Long-lived token for renewing the session with the identity provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    pub user: AuthUserDto,
    pub message: String,
}

/// User summary included in auth response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserDto {
    pub uid: String,
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<Account> for AuthUserDto {
    fn from(account: Account) -> Self {
        Self {
            uid: account.uid,
            email: account.email,
            display_name: account.display_name,
        }
    }
}

impl AuthResponseDto {
    pub fn from_session(session: AuthSession, message: &str) -> Self {
        Self {
            token: session.id_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            user: session.account.into(),
            message: message.to_string(),
        }
    }
}

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseDto {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            uid: user.uid,
            email: user.email,
            email_verified: user.email_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::PASSWORD_SPECIAL_CHARS;
    use crate::shared::messages;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use serde_json::json;

    fn register(email: &str, password: &str) -> RegisterRequestDto {
        serde_json::from_value(json!({ "email": email, "password": password })).unwrap()
    }

    fn login(email: &str, password: &str) -> LoginRequestDto {
        serde_json::from_value(json!({ "email": email, "password": password })).unwrap()
    }

    fn errors_of(dto: &impl Validate) -> ValidationError {
        ValidationError::from(dto.validate().unwrap_err())
    }

    fn sorted_messages(err: &ValidationError, field: &str) -> Vec<String> {
        let mut messages: Vec<String> = err
            .messages_for(field)
            .into_iter()
            .map(str::to_string)
            .collect();
        messages.sort();
        messages
    }

    fn sorted(expected: &[&str]) -> Vec<String> {
        let mut expected: Vec<String> = expected.iter().map(|m| m.to_string()).collect();
        expected.sort();
        expected
    }

    #[test]
    fn test_register_accepts_valid_credentials() {
        assert!(register("a@b.com", "Aa1!aaaa").validate().is_ok());
    }

    #[test]
    fn test_register_accepts_generated_emails() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(
                register(&email, "Aa1!aaaa").validate().is_ok(),
                "rejected {}",
                email
            );
        }
    }

    #[test]
    fn test_register_rejects_invalid_email_only() {
        let err = errors_of(&register("not-an-email", "Aa1!aaaa"));
        assert!(err.has_field("email"));
        assert!(!err.has_field("password"));
        assert_eq!(err.messages_for("email"), vec![messages::EMAIL_INVALID]);
    }

    #[test]
    fn test_register_rejects_short_password_for_length_and_classes() {
        let err = errors_of(&register("a@b.com", "short"));
        assert!(!err.has_field("email"));
        assert_eq!(
            sorted_messages(&err, "password"),
            sorted(&[
                messages::PASSWORD_LENGTH,
                messages::PASSWORD_UPPERCASE,
                messages::PASSWORD_DIGIT,
                messages::PASSWORD_SPECIAL,
            ])
        );
    }

    #[test]
    fn test_register_password_length_bounds() {
        let base = "Aa1!";
        let exactly_8 = format!("{}{}", base, "a".repeat(4));
        let exactly_50 = format!("{}{}", base, "a".repeat(46));
        let too_long = format!("{}{}", base, "a".repeat(47));
        let too_short = format!("{}{}", base, "a".repeat(3));

        assert!(register("a@b.com", &exactly_8).validate().is_ok());
        assert!(register("a@b.com", &exactly_50).validate().is_ok());
        assert_eq!(
            errors_of(&register("a@b.com", &too_long)).messages_for("password"),
            vec![messages::PASSWORD_LENGTH]
        );
        assert_eq!(
            errors_of(&register("a@b.com", &too_short)).messages_for("password"),
            vec![messages::PASSWORD_LENGTH]
        );
    }

    #[test]
    fn test_register_each_missing_class_is_reported() {
        let cases = [
            ("aa1!aaaa", messages::PASSWORD_UPPERCASE),
            ("AA1!AAAA", messages::PASSWORD_LOWERCASE),
            ("Aaa!aaaa", messages::PASSWORD_DIGIT),
            ("Aa1aaaaa", messages::PASSWORD_SPECIAL),
        ];
        for (password, expected) in cases {
            let err = errors_of(&register("a@b.com", password));
            assert_eq!(err.messages_for("password"), vec![expected], "{}", password);
        }
    }

    #[test]
    fn test_register_accepts_every_special_character() {
        for special in PASSWORD_SPECIAL_CHARS.chars() {
            let password = format!("Aa1{}aaaa", special);
            assert!(
                register("a@b.com", &password).validate().is_ok(),
                "rejected special {}",
                special
            );
        }
    }

    #[test]
    fn test_register_rejects_special_outside_set() {
        let err = errors_of(&register("a@b.com", "Aa1-aaaa"));
        assert_eq!(err.messages_for("password"), vec![messages::PASSWORD_SPECIAL]);
    }

    #[test]
    fn test_register_missing_fields_report_only_required() {
        let dto: RegisterRequestDto = serde_json::from_value(json!({ "password": "" })).unwrap();
        let err = errors_of(&dto);
        assert_eq!(err.messages_for("email"), vec!["O e-mail é obrigatório"]);
        assert_eq!(err.messages_for("password"), vec!["A senha é obrigatória"]);
    }

    #[test]
    fn test_login_accepts_any_non_empty_password() {
        assert!(login("a@b.com", "x").validate().is_ok());
        assert!(login("a@b.com", "short").validate().is_ok());
    }

    #[test]
    fn test_login_rejects_empty_password_and_bad_email() {
        let err = errors_of(&login("nope", ""));
        assert_eq!(err.messages_for("email"), vec![messages::EMAIL_INVALID]);
        assert_eq!(err.messages_for("password"), vec!["A senha é obrigatória"]);
    }

    #[test]
    fn test_into_credentials() {
        let creds = login("a@b.com", "pw").into_credentials().unwrap();
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, "pw");
        assert!(login("", "pw").into_credentials().is_err());
    }

    #[test]
    fn test_auth_response_serializes_camel_case() {
        let response = AuthResponseDto {
            token: "t".to_string(),
            refresh_token: None,
            expires_in: Some(3600),
            user: AuthUserDto {
                uid: "u".to_string(),
                email: Some("a@b.com".to_string()),
                display_name: Some("Maria".to_string()),
            },
            message: messages::LOGIN_SUCCESS.to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["expiresIn"], 3600);
        assert_eq!(value["user"]["displayName"], "Maria");
        assert!(value.get("refreshToken").is_none());
    }
}
