use super::{
    clean_interests, hash_password, validate_credentials, validate_registration,
    verify_password, AuthError, Registration, User, DEFAULT_AVATAR,
};
use crate::config::AuthConfig;
use crate::storage::{read_json, write_json, KeyValueStore, ACCOUNTS_KEY, USER_KEY};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Built-in demo account
pub const DEMO_EMAIL: &str = "demo@wildlink.com";
pub const DEMO_PASSWORD: &str = "demo123";

/// Change notification broadcast to subscribers
#[derive(Clone, Debug)]
pub enum AuthEvent {
    SignedIn(User),
    SignedOut,
    ProfileUpdated(User),
}

/// Persisted account: profile plus salted password digest
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    user: User,
    password_digest: String,
    password_salt: String,
}

/// Holds the signed-in user and the local account registry.
///
/// Accounts are mirrored to the `accounts` key, the current session to the
/// `user` key.
pub struct AuthStore {
    storage: Arc<dyn KeyValueStore>,
    config: AuthConfig,
    /// Primary storage: user id -> Account
    accounts: DashMap<String, Account>,
    /// Secondary index: normalized email -> user id (for uniqueness)
    emails: DashMap<String, String>,
    user: RwLock<Option<User>>,
    /// Serializes registry persistence
    persist_lock: Mutex<()>,
    events_tx: broadcast::Sender<AuthEvent>,
}

impl AuthStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, config: AuthConfig) -> Self {
        let (events_tx, _) = broadcast::channel(100);

        Self {
            storage,
            config,
            accounts: DashMap::new(),
            emails: DashMap::new(),
            user: RwLock::new(None),
            persist_lock: Mutex::new(()),
            events_tx,
        }
    }

    /// Restore the account registry, then seed the demo account if enabled.
    ///
    /// Read failures are logged and leave the registry empty.
    pub fn load_accounts(&self) {
        match read_json::<Vec<Account>>(self.storage.as_ref(), ACCOUNTS_KEY) {
            Ok(Some(stored)) => {
                for account in stored {
                    self.emails
                        .insert(normalize_email(&account.user.email), account.user.id.clone());
                    self.accounts.insert(account.user.id.clone(), account);
                }
                info!(count = self.accounts.len(), "Accounts loaded");
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, "Error loading accounts"),
        }

        if self.config.seed_demo_account && !self.emails.contains_key(DEMO_EMAIL) {
            let demo = Registration {
                email: DEMO_EMAIL.to_string(),
                password: DEMO_PASSWORD.to_string(),
                name: "Demo Explorer".to_string(),
                location: "Lagos, Nigeria".to_string(),
                interests: vec!["Birds".to_string(), "Mammals".to_string()],
                avatar: None,
            };
            if let Err(e) = self.create_account(demo) {
                warn!(error = %e, "Failed to seed demo account");
            }
        }
    }

    /// Restore the signed-in user from the previous session.
    pub fn load_user(&self) {
        match read_json::<User>(self.storage.as_ref(), USER_KEY) {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "Session restored");
                *self.user.write().unwrap() = Some(user);
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, "Error loading user"),
        }
    }

    /// Sign in with email and password.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        validate_credentials(email, password)?;

        let user_id = self
            .emails
            .get(&normalize_email(email))
            .map(|id| id.value().clone())
            .ok_or(AuthError::AccountNotFound)?;

        let user = {
            let account = self
                .accounts
                .get(&user_id)
                .ok_or(AuthError::AccountNotFound)?;
            if !verify_password(password, &account.password_digest, &account.password_salt) {
                return Err(AuthError::InvalidCredentials);
            }
            account.user.clone()
        };

        self.start_session(user)
    }

    /// Create an account and sign in as it.
    pub fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let user = self.create_account(registration)?;
        self.start_session(user)
    }

    /// End the session and clear the persisted user.
    ///
    /// On a storage error the session stays signed in.
    pub fn logout(&self) -> Result<(), AuthError> {
        let mut current = self.user.write().unwrap();

        self.storage
            .remove_item(USER_KEY)
            .map_err(|e| AuthError::Storage(format!("{:#}", e)))?;
        *current = None;
        drop(current);

        info!("Signed out");
        let _ = self.events_tx.send(AuthEvent::SignedOut);
        Ok(())
    }

    /// Bump the signed-in user's sighting count. No-op when signed out.
    pub fn record_sighting(&self) -> Result<Option<User>, AuthError> {
        self.update_current_user(|user| user.sightings += 1)
    }

    /// Add or remove a species from the user's favorites.
    ///
    /// Returns whether the species is a favorite afterwards, or `None` when
    /// signed out.
    pub fn toggle_favorite_species(&self, species_name: &str) -> Result<Option<bool>, AuthError> {
        let mut now_favorite = false;
        let updated = self.update_current_user(|user| {
            if let Some(pos) = user.favorite_species.iter().position(|s| s == species_name) {
                user.favorite_species.remove(pos);
            } else {
                user.favorite_species.push(species_name.to_string());
                now_favorite = true;
            }
        })?;
        Ok(updated.map(|_| now_favorite))
    }

    /// Signed-in user, if any
    pub fn user(&self) -> Option<User> {
        self.user.read().unwrap().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.read().unwrap().is_some()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events_tx.subscribe()
    }

    fn create_account(&self, registration: Registration) -> Result<User, AuthError> {
        validate_registration(&registration)?;

        let user_id = Uuid::new_v4().to_string();
        let email = normalize_email(&registration.email);

        // Claim the email atomically
        match self.emails.entry(email.clone()) {
            Entry::Occupied(_) => return Err(AuthError::EmailAlreadyRegistered),
            Entry::Vacant(slot) => {
                slot.insert(user_id.clone());
            }
        }

        let (password_digest, password_salt) = hash_password(&registration.password);
        let user = User {
            id: user_id.clone(),
            email,
            name: registration.name.trim().to_string(),
            location: registration.location.trim().to_string(),
            interests: clean_interests(&registration.interests),
            avatar: registration
                .avatar
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            join_date: Utc::now(),
            sightings: 0,
            favorite_species: Vec::new(),
        };

        self.accounts.insert(
            user_id.clone(),
            Account {
                user: user.clone(),
                password_digest,
                password_salt,
            },
        );

        if let Err(e) = self.persist_accounts() {
            self.accounts.remove(&user_id);
            self.emails.remove(&user.email);
            return Err(e);
        }

        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    fn start_session(&self, user: User) -> Result<User, AuthError> {
        write_json(self.storage.as_ref(), USER_KEY, &user)
            .map_err(|e| AuthError::Storage(format!("{:#}", e)))?;

        *self.user.write().unwrap() = Some(user.clone());

        info!(user_id = %user.id, "Signed in");
        let _ = self.events_tx.send(AuthEvent::SignedIn(user.clone()));
        Ok(user)
    }

    /// Apply `f` to the signed-in user and persist the session and the
    /// registry. Memory changes only once both writes succeed; a registry
    /// failure restores the previous session record.
    fn update_current_user<F>(&self, f: F) -> Result<Option<User>, AuthError>
    where
        F: FnOnce(&mut User),
    {
        let mut current = self.user.write().unwrap();
        let Some(previous) = current.clone() else {
            return Ok(None);
        };

        let mut updated = previous.clone();
        f(&mut updated);

        write_json(self.storage.as_ref(), USER_KEY, &updated)
            .map_err(|e| AuthError::Storage(format!("{:#}", e)))?;

        let replaced = self
            .accounts
            .get_mut(&updated.id)
            .map(|mut account| std::mem::replace(&mut account.user, updated.clone()));

        if let Err(e) = self.persist_accounts() {
            if let Some(old) = replaced {
                if let Some(mut account) = self.accounts.get_mut(&updated.id) {
                    account.user = old;
                }
            }
            if let Err(restore) = write_json(self.storage.as_ref(), USER_KEY, &previous) {
                error!(error = %restore, "Failed to restore session record");
            }
            return Err(e);
        }

        *current = Some(updated.clone());
        drop(current);

        let _ = self.events_tx.send(AuthEvent::ProfileUpdated(updated.clone()));
        Ok(Some(updated))
    }

    fn persist_accounts(&self) -> Result<(), AuthError> {
        let _guard = self.persist_lock.lock().unwrap();

        let mut accounts: Vec<Account> = self.accounts.iter().map(|a| a.value().clone()).collect();
        accounts.sort_by(|a, b| a.user.join_date.cmp(&b.user.join_date));

        write_json(self.storage.as_ref(), ACCOUNTS_KEY, &accounts)
            .map_err(|e| AuthError::Storage(format!("{:#}", e)))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
