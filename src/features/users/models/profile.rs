use sqlx::FromRow;

/// Locally stored profile data, keyed by the auth store's uid
#[derive(Debug, Clone, Default, FromRow)]
pub struct UserProfile {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Values written by an upsert; `None` keeps the stored column
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
