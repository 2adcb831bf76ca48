use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::emergency_contacts::dtos::{
    ContactResponseDto, CreateContactDto, UpdateContactDto,
};
use crate::features::emergency_contacts::store::ContactStore;
use crate::shared::messages;

/// Service for the authenticated user's emergency contacts
pub struct ContactService {
    contacts: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactStore>) -> Self {
        Self { contacts }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: CreateContactDto,
    ) -> Result<ContactResponseDto> {
        let new_contact = dto.into_new_contact(&user.uid)?;
        let contact = self.contacts.insert(new_contact).await?;

        tracing::info!(
            "Emergency contact created: id={}, uid={}",
            contact.id,
            user.uid
        );

        Ok(contact.into())
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<ContactResponseDto>> {
        let contacts = self.contacts.list_for_user(&user.uid).await?;
        Ok(contacts.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: Uuid) -> Result<ContactResponseDto> {
        self.contacts
            .find(&user.uid, id)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(messages::CONTACT_NOT_FOUND.to_string()))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateContactDto,
    ) -> Result<ContactResponseDto> {
        let changes = dto.into_changes()?;
        let contact = self
            .contacts
            .update(&user.uid, id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::CONTACT_NOT_FOUND.to_string()))?;

        tracing::info!("Emergency contact updated: id={}, uid={}", id, user.uid);

        Ok(contact.into())
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        if !self.contacts.delete(&user.uid, id).await? {
            return Err(AppError::NotFound(messages::CONTACT_NOT_FOUND.to_string()));
        }

        tracing::info!("Emergency contact deleted: id={}, uid={}", id, user.uid);
        Ok(())
    }
}
