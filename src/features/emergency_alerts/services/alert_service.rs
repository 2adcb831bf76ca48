use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::emergency_alerts::dtos::{AlertResponseDto, CreateAlertDto};
use crate::features::emergency_alerts::models::NewAlert;
use crate::features::emergency_alerts::store::AlertStore;
use crate::features::emergency_contacts::ContactStore;
use crate::shared::messages;

/// Service for raising and resolving emergency alerts
pub struct AlertService {
    alerts: Arc<dyn AlertStore>,
    contacts: Arc<dyn ContactStore>,
}

impl AlertService {
    pub fn new(alerts: Arc<dyn AlertStore>, contacts: Arc<dyn ContactStore>) -> Self {
        Self { alerts, contacts }
    }

    /// Record an alert and fan it out to the user's active contacts
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        dto: CreateAlertDto,
    ) -> Result<AlertResponseDto> {
        let request = dto.into_request()?;
        let recipients = self.contacts.list_active(&user.uid).await?;

        let alert = self
            .alerts
            .insert(NewAlert {
                user_id: user.uid.clone(),
                message: request.message,
                location: request.location,
                notified_contacts: recipients.len() as i32,
            })
            .await?;

        for contact in &recipients {
            tracing::info!(
                alert_id = %alert.id,
                contact_id = %contact.id,
                "Notifying emergency contact {} ({})",
                contact.name,
                contact.relationship
            );
        }

        if recipients.is_empty() {
            tracing::warn!(
                "Emergency alert raised with no active contacts: id={}, uid={}",
                alert.id,
                user.uid
            );
        } else {
            tracing::info!(
                "Emergency alert raised: id={}, uid={}, contacts={}",
                alert.id,
                user.uid,
                recipients.len()
            );
        }

        Ok(alert.into())
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<AlertResponseDto>> {
        let alerts = self.alerts.list_for_user(&user.uid).await?;
        Ok(alerts.into_iter().map(|a| a.into()).collect())
    }

    pub async fn resolve(&self, user: &AuthenticatedUser, id: Uuid) -> Result<AlertResponseDto> {
        let alert = self
            .alerts
            .find(&user.uid, id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::ALERT_NOT_FOUND.to_string()))?;

        if !alert.is_active() {
            return Err(AppError::Conflict(messages::ALERT_ALREADY_RESOLVED.to_string()));
        }

        let resolved = self
            .alerts
            .resolve(&user.uid, id)
            .await?
            .ok_or_else(|| AppError::Conflict(messages::ALERT_ALREADY_RESOLVED.to_string()))?;

        tracing::info!("Emergency alert resolved: id={}, uid={}", id, user.uid);

        Ok(resolved.into())
    }
}
