use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::emergency_alerts::models::{EmergencyAlert, NewAlert};
use crate::shared::constants::{ALERT_STATUS_ACTIVE, ALERT_STATUS_RESOLVED};

/// Persistence for emergency alerts, scoped to the user who raised them
#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn insert(&self, alert: NewAlert) -> Result<EmergencyAlert>;

    /// Newest first
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<EmergencyAlert>>;

    async fn find(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyAlert>>;

    /// Mark an active alert as resolved; `None` when no active alert matched
    async fn resolve(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyAlert>>;
}

pub struct PgAlertStore {
    pool: PgPool,
}

impl PgAlertStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertStore for PgAlertStore {
    async fn insert(&self, alert: NewAlert) -> Result<EmergencyAlert> {
        let (latitude, longitude, address) = match alert.location {
            Some(loc) => (Some(loc.latitude), Some(loc.longitude), loc.address),
            None => (None, None, None),
        };

        sqlx::query_as::<_, EmergencyAlert>(
            r#"
            INSERT INTO emergency_alerts (
                id, user_id, message, latitude, longitude, address, status, notified_contacts
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, message, latitude, longitude, address, status,
                      notified_contacts, created_at, resolved_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(alert.user_id)
        .bind(alert.message)
        .bind(latitude)
        .bind(longitude)
        .bind(address)
        .bind(ALERT_STATUS_ACTIVE)
        .bind(alert.notified_contacts)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert emergency alert: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<EmergencyAlert>> {
        sqlx::query_as::<_, EmergencyAlert>(
            r#"
            SELECT id, message, latitude, longitude, address, status,
                   notified_contacts, created_at, resolved_at
            FROM emergency_alerts
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list emergency alerts: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyAlert>> {
        sqlx::query_as::<_, EmergencyAlert>(
            r#"
            SELECT id, message, latitude, longitude, address, status,
                   notified_contacts, created_at, resolved_at
            FROM emergency_alerts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get emergency alert: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn resolve(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyAlert>> {
        sqlx::query_as::<_, EmergencyAlert>(
            r#"
            UPDATE emergency_alerts
            SET status = $3, resolved_at = NOW()
            WHERE id = $1 AND user_id = $2 AND status = $4
            RETURNING id, message, latitude, longitude, address, status,
                      notified_contacts, created_at, resolved_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(ALERT_STATUS_RESOLVED)
        .bind(ALERT_STATUS_ACTIVE)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve emergency alert: {:?}", e);
            AppError::Database(e)
        })
    }
}
