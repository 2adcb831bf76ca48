use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{ProfileChanges, UserProfile};

/// Persistence for the profile fields the auth store does not hold
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self, uid: &str) -> Result<Option<UserProfile>>;

    /// Insert the profile or merge `changes` into the existing row
    async fn upsert(&self, uid: &str, changes: ProfileChanges) -> Result<UserProfile>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find(&self, uid: &str) -> Result<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT display_name, phone, email
            FROM user_profiles
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load profile: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn upsert(&self, uid: &str, changes: ProfileChanges) -> Result<UserProfile> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (uid, display_name, phone, email)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (uid) DO UPDATE SET
                display_name = COALESCE(EXCLUDED.display_name, user_profiles.display_name),
                phone = COALESCE(EXCLUDED.phone, user_profiles.phone),
                email = COALESCE(EXCLUDED.email, user_profiles.email),
                updated_at = NOW()
            RETURNING display_name, phone, email
            "#,
        )
        .bind(uid)
        .bind(changes.display_name)
        .bind(changes.phone)
        .bind(changes.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert profile: {:?}", e);
            AppError::Database(e)
        })
    }
}
