use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::emergency_alerts::{dtos as alerts_dtos, handlers as alerts_handlers};
use crate::features::emergency_contacts::{dtos as contacts_dtos, handlers as contacts_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::validation::FieldError;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::get_me,
        // Profile
        users_handlers::get_profile,
        users_handlers::update_profile,
        users_handlers::change_password,
        // Emergency contacts
        contacts_handlers::create_contact,
        contacts_handlers::list_contacts,
        contacts_handlers::get_contact,
        contacts_handlers::update_contact,
        contacts_handlers::delete_contact,
        // Emergency alerts
        alerts_handlers::create_alert,
        alerts_handlers::list_alerts,
        alerts_handlers::resolve_alert,
    ),
    components(
        schemas(
            // Shared
            Meta,
            FieldError,
            // Auth
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::AuthResponseDto,
            auth_dtos::AuthUserDto,
            auth_dtos::MeResponseDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth_dtos::MeResponseDto>,
            // Profile
            users_dtos::UpdateProfileDto,
            users_dtos::ChangePasswordDto,
            users_dtos::UserProfileResponseDto,
            users_dtos::PasswordChangedResponseDto,
            ApiResponse<users_dtos::UserProfileResponseDto>,
            ApiResponse<users_dtos::PasswordChangedResponseDto>,
            // Emergency contacts
            contacts_dtos::CreateContactDto,
            contacts_dtos::UpdateContactDto,
            contacts_dtos::ContactResponseDto,
            ApiResponse<contacts_dtos::ContactResponseDto>,
            ApiResponse<Vec<contacts_dtos::ContactResponseDto>>,
            // Emergency alerts
            alerts_dtos::CreateAlertDto,
            alerts_dtos::LocationDto,
            alerts_dtos::LocationResponseDto,
            alerts_dtos::AlertResponseDto,
            ApiResponse<alerts_dtos::AlertResponseDto>,
            ApiResponse<Vec<alerts_dtos::AlertResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and current identity"),
        (name = "profile", description = "Profile and password management"),
        (name = "emergency-contacts", description = "Emergency contacts of the current user"),
        (name = "emergency-alerts", description = "Emergency alerts raised by the current user"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Sobriety API",
        version = "0.1.0",
        description = "API documentation for the sobriety support app",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Identity provider ID token"))
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/auth/register",
            "/auth/login",
            "/auth/me",
            "/profile",
            "/profile/password",
            "/emergency-contacts",
            "/emergency-contacts/{id}",
            "/emergency-alerts",
            "/emergency-alerts/{id}/resolve",
        ] {
            assert!(paths.contains(&expected), "missing path {}", expected);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
