use log::{error, info};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::config::StoreConfig;
use super::error::AdminError;
use super::ids::IdGenerator;
use super::password::{hash_password, verify_password};
use super::record::{AdminProfile, AdminRecord, NewAdmin};
use super::storage::{AdminStorage, JsonFileStorage};
use crate::modules::utils::logging::{log_auth_event, log_data_operation};
use crate::modules::utils::time::now_iso8601;

/// File-backed collection of administrators.
///
/// Lookups re-read storage on every call and never fail: anything that goes
/// wrong is logged and reported as "empty", "not found" or "invalid".
/// `create` is the only operation that returns its errors.
pub struct AdminStore {
    storage: Arc<dyn AdminStorage>,
    hash_cost: u32,
    // Serializes read-modify-write cycles from this store
    write_lock: Mutex<()>,
}

impl AdminStore {
    pub fn new(storage: Arc<dyn AdminStorage>, hash_cost: u32) -> Self {
        Self {
            storage,
            hash_cost,
            write_lock: Mutex::new(()),
        }
    }

    /// Open a store over the JSON file named in the configuration
    pub fn open(config: &StoreConfig) -> Result<Self, AdminError> {
        config.validate()?;
        let storage = JsonFileStorage::new(config.data_file.clone());
        info!("Using admins file {}", storage.path().display());
        Ok(Self::new(Arc::new(storage), config.hash_cost))
    }

    /// Every stored admin in insertion order, or an empty list if storage
    /// cannot be read
    pub async fn list_all(&self) -> Vec<AdminRecord> {
        match self.storage.load().await {
            Ok(admins) => admins,
            Err(e) => {
                error!(
                    "Error reading admins from {}: {}",
                    self.storage.describe(),
                    e
                );
                Vec::new()
            }
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Option<AdminRecord> {
        self.list_all()
            .await
            .into_iter()
            .find(|admin| admin.id == id)
    }

    /// First admin with this username; usernames are not forced unique
    pub async fn find_by_username(&self, username: &str) -> Option<AdminRecord> {
        self.list_all()
            .await
            .into_iter()
            .find(|admin| admin.username == username)
    }

    /// Check a plaintext password against a stored hash. A malformed hash
    /// is logged and treated as a mismatch.
    pub async fn verify_credential(&self, plaintext: &str, hash: &str) -> bool {
        match verify_password(plaintext, hash).await {
            Ok(matches) => matches,
            Err(e) => {
                error!("Error verifying password: {}", e);
                false
            }
        }
    }

    /// Look up an admin by username and check the password, returning the
    /// profile only when both succeed
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<AdminProfile> {
        let Some(admin) = self.find_by_username(username).await else {
            log_auth_event("login", username, false, Some("unknown username"));
            return None;
        };

        if self.verify_credential(password, &admin.password).await {
            log_auth_event("login", username, true, None);
            Some(admin.into_profile())
        } else {
            log_auth_event("login", username, false, Some("invalid password"));
            None
        }
    }

    /// Hash the password, append a new admin and rewrite the collection.
    ///
    /// Unlike the lookups, a collection that cannot be read is an error
    /// here, so an unparseable file is never overwritten.
    pub async fn create(&self, data: NewAdmin) -> Result<AdminProfile, AdminError> {
        let username_hint = data
            .fields()
            .get("username")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        match self.try_create(data).await {
            Ok(profile) => {
                log_data_operation(
                    "create",
                    &profile.username,
                    "admin",
                    true,
                    Some(profile.id.as_str()),
                );
                Ok(profile)
            }
            Err(e) => {
                error!("Error creating admin: {}", e);
                log_data_operation("create", &username_hint, "admin", false, None);
                Err(e)
            }
        }
    }

    async fn try_create(&self, data: NewAdmin) -> Result<AdminProfile, AdminError> {
        let parts = data.into_parts()?;

        let _guard = self.write_lock.lock().await;
        let mut admins = self.storage.load().await?;

        let password = hash_password(&parts.password, self.hash_cost).await?;
        let admin = AdminRecord {
            id: IdGenerator::next_id(&admins),
            username: parts.username,
            password,
            created_at: now_iso8601(),
            extra: parts.extra,
        };

        admins.push(admin.clone());
        self.storage.save(&admins).await?;

        Ok(admin.into_profile())
    }
}
