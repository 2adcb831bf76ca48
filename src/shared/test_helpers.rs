//! In-memory collaborators and router helpers for handler and service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, response::Response, Router};
use axum_test::TestServer;
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{
    Account, AccountUpdate, AccountUpdated, AuthSession, AuthenticatedUser,
};
use crate::features::auth::AuthStore;
use crate::features::emergency_alerts::models::{EmergencyAlert, NewAlert};
use crate::features::emergency_alerts::AlertStore;
use crate::features::emergency_contacts::models::{ContactChanges, EmergencyContact, NewContact};
use crate::features::emergency_contacts::ContactStore;
use crate::features::users::models::{ProfileChanges, UserProfile};
use crate::features::users::ProfileStore;
use crate::shared::constants::{ALERT_STATUS_ACTIVE, ALERT_STATUS_RESOLVED};
use crate::shared::messages;
use crate::shared::validation::ValidationError;

pub fn test_server(app: Router) -> TestServer {
    TestServer::new(app).expect("failed to start test server")
}

pub fn token_for(uid: &str) -> String {
    format!("token-{}", uid)
}

pub fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        uid: "test-uid".to_string(),
        email: Some("test@example.com".to_string()),
        email_verified: true,
        id_token: token_for("test-uid"),
    }
}

async fn inject_test_user(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(test_user());
    next.run(request).await
}

/// Run `router` as if every request carried a verified token for [`test_user`]
pub fn with_test_user(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_test_user))
}

// =============================================================================
// AUTH STORE
// =============================================================================

struct StoredAccount {
    account: Account,
    password: String,
}

/// Auth store that issues `token-<uid>` ID tokens
#[derive(Default)]
pub struct InMemoryAuthStore {
    accounts: Mutex<HashMap<String, StoredAccount>>,
    next_id: AtomicUsize,
    updates: AtomicUsize,
    weak_passwords: Mutex<Vec<String>>,
}

impl InMemoryAuthStore {
    pub fn seed(&self, uid: &str, email: &str, password: &str) {
        self.accounts.lock().unwrap().insert(
            uid.to_string(),
            StoredAccount {
                account: Account {
                    uid: uid.to_string(),
                    email: Some(email.to_string()),
                    display_name: None,
                    email_verified: true,
                },
                password: password.to_string(),
            },
        );
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    /// Number of successful `update_account` calls
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    /// Answer `password` the way the provider answers `WEAK_PASSWORD`
    pub fn reject_password(&self, password: &str) {
        self.weak_passwords.lock().unwrap().push(password.to_string());
    }

    fn check_strength(&self, password: &str) -> Result<()> {
        if self.weak_passwords.lock().unwrap().iter().any(|p| p == password) {
            return Err(AppError::Validation(ValidationError::single(
                "password",
                messages::PASSWORD_LENGTH,
            )));
        }
        Ok(())
    }

    fn session(account: &Account) -> AuthSession {
        AuthSession {
            id_token: token_for(&account.uid),
            refresh_token: Some(format!("refresh-{}", account.uid)),
            expires_in: Some(3600),
            account: account.clone(),
        }
    }

    fn uid_from_token(id_token: &str) -> Result<String> {
        id_token
            .strip_prefix("token-")
            .map(str::to_string)
            .ok_or_else(|| AppError::Unauthorized(messages::INVALID_TOKEN.to_string()))
    }
}

#[async_trait]
impl AuthStore for InMemoryAuthStore {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.check_strength(password)?;
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .values()
            .any(|a| a.account.email.as_deref() == Some(email))
        {
            return Err(AppError::Conflict(
                messages::EMAIL_ALREADY_REGISTERED.to_string(),
            ));
        }

        let uid = format!("uid-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let account = Account {
            uid: uid.clone(),
            email: Some(email.to_string()),
            display_name: None,
            email_verified: false,
        };
        let session = Self::session(&account);
        accounts.insert(
            uid,
            StoredAccount {
                account,
                password: password.to_string(),
            },
        );
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let accounts = self.accounts.lock().unwrap();
        accounts
            .values()
            .find(|a| a.account.email.as_deref() == Some(email) && a.password == password)
            .map(|a| Self::session(&a.account))
            .ok_or_else(|| AppError::Unauthorized(messages::INVALID_CREDENTIALS.to_string()))
    }

    async fn lookup(&self, id_token: &str) -> Result<Account> {
        let uid = Self::uid_from_token(id_token)?;
        self.accounts
            .lock()
            .unwrap()
            .get(&uid)
            .map(|a| a.account.clone())
            .ok_or_else(|| AppError::Unauthorized(messages::INVALID_TOKEN.to_string()))
    }

    async fn update_account(
        &self,
        id_token: &str,
        update: AccountUpdate,
    ) -> Result<AccountUpdated> {
        let uid = Self::uid_from_token(id_token)?;
        if let Some(password) = &update.password {
            self.check_strength(password)?;
        }
        let mut accounts = self.accounts.lock().unwrap();

        if let Some(email) = &update.email {
            let taken = accounts
                .iter()
                .any(|(id, a)| *id != uid && a.account.email.as_deref() == Some(email.as_str()));
            if taken {
                return Err(AppError::Conflict(
                    messages::EMAIL_ALREADY_REGISTERED.to_string(),
                ));
            }
        }

        let stored = accounts
            .get_mut(&uid)
            .ok_or_else(|| AppError::Unauthorized(messages::INVALID_TOKEN.to_string()))?;

        let credentials_changed = update.email.is_some() || update.password.is_some();
        if let Some(display_name) = update.display_name {
            stored.account.display_name = Some(display_name);
        }
        if let Some(email) = update.email {
            stored.account.email = Some(email);
        }
        if let Some(password) = update.password {
            stored.password = password;
        }

        self.updates.fetch_add(1, Ordering::SeqCst);

        Ok(AccountUpdated {
            account: stored.account.clone(),
            id_token: credentials_changed.then(|| token_for(&uid)),
        })
    }
}

// =============================================================================
// PROFILE STORE
// =============================================================================

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, uid: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.lock().unwrap().get(uid).cloned())
    }

    async fn upsert(&self, uid: &str, changes: ProfileChanges) -> Result<UserProfile> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles.entry(uid.to_string()).or_default();

        if changes.display_name.is_some() {
            profile.display_name = changes.display_name;
        }
        if changes.phone.is_some() {
            profile.phone = changes.phone;
        }
        if changes.email.is_some() {
            profile.email = changes.email;
        }

        Ok(profile.clone())
    }
}

// =============================================================================
// CONTACT STORE
// =============================================================================

/// Contacts paired with their owner's uid
#[derive(Default)]
pub struct InMemoryContactStore {
    contacts: Mutex<Vec<(String, EmergencyContact)>>,
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn insert(&self, contact: NewContact) -> Result<EmergencyContact> {
        let now = Utc::now();
        let owner = contact.user_id;
        let contact = EmergencyContact {
            id: Uuid::now_v7(),
            name: contact.name,
            phone: contact.phone,
            relationship: contact.relationship,
            is_active: contact.is_active,
            created_at: now,
            updated_at: now,
        };
        self.contacts.lock().unwrap().push((owner, contact.clone()));
        Ok(contact)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<EmergencyContact>> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn list_active(&self, user_id: &str) -> Result<Vec<EmergencyContact>> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, c)| owner == user_id && c.is_active)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn find(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyContact>> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .find(|(owner, c)| c.id == id && owner == user_id)
            .map(|(_, c)| c.clone()))
    }

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        changes: ContactChanges,
    ) -> Result<Option<EmergencyContact>> {
        let mut contacts = self.contacts.lock().unwrap();
        let Some((_, contact)) = contacts
            .iter_mut()
            .find(|(owner, c)| c.id == id && owner == user_id)
        else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            contact.name = name;
        }
        if let Some(phone) = changes.phone {
            contact.phone = phone;
        }
        if let Some(relationship) = changes.relationship {
            contact.relationship = relationship;
        }
        if let Some(is_active) = changes.is_active {
            contact.is_active = is_active;
        }
        contact.updated_at = Utc::now();

        Ok(Some(contact.clone()))
    }

    async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool> {
        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|(owner, c)| !(c.id == id && owner == user_id));
        Ok(contacts.len() < before)
    }
}

// =============================================================================
// ALERT STORE
// =============================================================================

/// Alerts paired with their owner's uid, oldest first
#[derive(Default)]
pub struct InMemoryAlertStore {
    alerts: Mutex<Vec<(String, EmergencyAlert)>>,
}

#[async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn insert(&self, alert: NewAlert) -> Result<EmergencyAlert> {
        let (latitude, longitude, address) = match alert.location {
            Some(loc) => (Some(loc.latitude), Some(loc.longitude), loc.address),
            None => (None, None, None),
        };
        let owner = alert.user_id;
        let alert = EmergencyAlert {
            id: Uuid::now_v7(),
            message: alert.message,
            latitude,
            longitude,
            address,
            status: ALERT_STATUS_ACTIVE.to_string(),
            notified_contacts: alert.notified_contacts,
            created_at: Utc::now(),
            resolved_at: None,
        };
        self.alerts.lock().unwrap().push((owner, alert.clone()));
        Ok(alert)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<EmergencyAlert>> {
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, a)| a.clone())
            .collect())
    }

    async fn find(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyAlert>> {
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .find(|(owner, a)| a.id == id && owner == user_id)
            .map(|(_, a)| a.clone()))
    }

    async fn resolve(&self, user_id: &str, id: Uuid) -> Result<Option<EmergencyAlert>> {
        let mut alerts = self.alerts.lock().unwrap();
        Ok(alerts
            .iter_mut()
            .find(|(owner, a)| a.id == id && owner == user_id && a.is_active())
            .map(|(_, a)| {
                a.status = ALERT_STATUS_RESOLVED.to_string();
                a.resolved_at = Some(Utc::now());
                a.clone()
            }))
    }
}
