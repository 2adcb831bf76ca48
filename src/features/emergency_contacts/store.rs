use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::emergency_contacts::models::{ContactChanges, EmergencyContact, NewContact};

/// Persistence for emergency contacts. Every lookup is scoped to the owner.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, contact: NewContact) -> Result<EmergencyContact>;

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<EmergencyContact>>;

    /// Contacts to notify when the user raises an alert
    async fn list_active(&self, user_id: &str) -> Result<Vec<EmergencyContact>>;

    async fn find(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyContact>>;

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ContactChanges,
    ) -> Result<Option<EmergencyContact>>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool>;
}

pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn insert(&self, contact: NewContact) -> Result<EmergencyContact> {
        sqlx::query_as::<_, EmergencyContact>(
            r#"
            INSERT INTO emergency_contacts (id, user_id, name, phone, relationship, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, phone, relationship, is_active, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(contact.user_id)
        .bind(contact.name)
        .bind(contact.phone)
        .bind(contact.relationship)
        .bind(contact.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert emergency contact: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<EmergencyContact>> {
        sqlx::query_as::<_, EmergencyContact>(
            r#"
            SELECT id, name, phone, relationship, is_active, created_at, updated_at
            FROM emergency_contacts
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list emergency contacts: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_active(&self, user_id: &str) -> Result<Vec<EmergencyContact>> {
        sqlx::query_as::<_, EmergencyContact>(
            r#"
            SELECT id, name, phone, relationship, is_active, created_at, updated_at
            FROM emergency_contacts
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list active emergency contacts: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyContact>> {
        sqlx::query_as::<_, EmergencyContact>(
            r#"
            SELECT id, name, phone, relationship, is_active, created_at, updated_at
            FROM emergency_contacts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get emergency contact: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ContactChanges,
    ) -> Result<Option<EmergencyContact>> {
        sqlx::query_as::<_, EmergencyContact>(
            r#"
            UPDATE emergency_contacts SET
                name = COALESCE($3, name),
                phone = COALESCE($4, phone),
                relationship = COALESCE($5, relationship),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, phone, relationship, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(changes.name)
        .bind(changes.phone)
        .bind(changes.relationship)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update emergency contact: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM emergency_contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete emergency contact: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
