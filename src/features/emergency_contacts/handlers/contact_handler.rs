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
use crate::features::emergency_contacts::dtos::{
    ContactResponseDto, CreateContactDto, UpdateContactDto,
};
use crate::features::emergency_contacts::services::ContactService;
use crate::shared::messages;
use crate::shared::types::{ApiResponse, Meta};

/// Add an emergency contact
#[utoipa::path(
    post,
    path = "/emergency-contacts",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Contact created", body = ApiResponse<ContactResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "emergency-contacts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_contact(
    user: AuthenticatedUser,
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<CreateContactDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContactResponseDto>>)> {
    let contact = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(contact),
            Some(messages::CONTACT_CREATED.to_string()),
            None,
        )),
    ))
}

/// List the current user's emergency contacts
#[utoipa::path(
    get,
    path = "/emergency-contacts",
    responses(
        (status = 200, description = "List of contacts", body = ApiResponse<Vec<ContactResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "emergency-contacts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_contacts(
    user: AuthenticatedUser,
    State(service): State<Arc<ContactService>>,
) -> Result<Json<ApiResponse<Vec<ContactResponseDto>>>> {
    let contacts = service.list(&user).await?;
    let total = contacts.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(contacts),
        None,
        Some(Meta { total }),
    )))
}

/// Get one emergency contact
#[utoipa::path(
    get,
    path = "/emergency-contacts/{id}",
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact found", body = ApiResponse<ContactResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contact not found")
    ),
    tag = "emergency-contacts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_contact(
    user: AuthenticatedUser,
    State(service): State<Arc<ContactService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContactResponseDto>>> {
    let contact = service.get(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(contact), None, None)))
}

/// Edit an emergency contact
#[utoipa::path(
    patch,
    path = "/emergency-contacts/{id}",
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Contact updated", body = ApiResponse<ContactResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contact not found")
    ),
    tag = "emergency-contacts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_contact(
    user: AuthenticatedUser,
    State(service): State<Arc<ContactService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateContactDto>,
) -> Result<Json<ApiResponse<ContactResponseDto>>> {
    let contact = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(contact),
        Some(messages::CONTACT_UPDATED.to_string()),
        None,
    )))
}

/// Remove an emergency contact
#[utoipa::path(
    delete,
    path = "/emergency-contacts/{id}",
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contact not found")
    ),
    tag = "emergency-contacts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_contact(
    user: AuthenticatedUser,
    State(service): State<Arc<ContactService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(messages::CONTACT_DELETED.to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::emergency_contacts::routes;
    use crate::features::emergency_contacts::services::ContactService;
    use crate::shared::messages;
    use crate::shared::test_helpers::{test_server, with_test_user, InMemoryContactStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server() -> TestServer {
        let service = Arc::new(ContactService::new(Arc::new(
            InMemoryContactStore::default(),
        )));
        test_server(with_test_user(routes::routes(service)))
    }

    #[tokio::test]
    async fn test_create_contact_defaults_to_active() {
        let response = server()
            .post("/emergency-contacts")
            .json(&json!({"name": "Ana", "phone": "+55 11 98765-4321", "relationship": "Irmã"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["isActive"], true);
        assert_eq!(body["message"], messages::CONTACT_CREATED);
    }

    #[tokio::test]
    async fn test_create_contact_missing_relationship() {
        let response = server()
            .post("/emergency-contacts")
            .json(&json!({"name": "Ana", "phone": "+55 11 98765-4321"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"][0]["field"], "relationship");
        assert_eq!(
            body["errors"][0]["message"],
            "O grau de parentesco é obrigatório"
        );
    }

    #[tokio::test]
    async fn test_create_contact_rejects_non_boolean_is_active() {
        let response = server()
            .post("/emergency-contacts")
            .json(&json!({
                "name": "Ana",
                "phone": "+55 11 98765-4321",
                "relationship": "Irmã",
                "isActive": "sim"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"][0]["field"], "isActive");
    }

    #[tokio::test]
    async fn test_list_update_delete_flow() {
        let server = server();
        let created: Value = server
            .post("/emergency-contacts")
            .json(&json!({"name": "Ana", "phone": "123", "relationship": "Mãe"}))
            .await
            .json();
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let list: Value = server.get("/emergency-contacts").await.json();
        assert_eq!(list["meta"]["total"], 1);

        let response = server
            .patch(&format!("/emergency-contacts/{}", id))
            .json(&json!({"phone": "456"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["phone"], "456");

        server
            .delete(&format!("/emergency-contacts/{}", id))
            .await
            .assert_status_ok();
        server
            .get(&format!("/emergency-contacts/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
