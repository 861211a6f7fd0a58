//! Explicitly constructed application context.
//!
//! Owns one instance of each store over a shared key-value backend.
//! Lifecycle: `new` → `initialize().await` → queries and mutations →
//! `dispose()`.

use crate::auth::AuthStore;
use crate::config::{StorageBackend, StorageConfig, WildlinkConfig};
use crate::location::{GeolocationProvider, LocationStore, PermissionPrompt};
use crate::species::{NewSighting, Sighting, SpeciesStore};
use crate::storage::{KeyValueStore, MemoryKvStore, SqliteKvStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(test)]
mod tests;

/// Open the storage backend named in config.
pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Sqlite => {
            let store = SqliteKvStore::new(&config.path)
                .with_context(|| format!("Failed to open storage at {}", config.path))?;
            info!(path = %config.path, "Opened SQLite storage");
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(MemoryKvStore::new()))
        }
    }
}

pub struct AppContext {
    species: Arc<SpeciesStore>,
    location: Arc<LocationStore>,
    auth: Arc<AuthStore>,
}

impl AppContext {
    pub fn new(
        config: WildlinkConfig,
        storage: Arc<dyn KeyValueStore>,
        provider: Arc<dyn GeolocationProvider>,
        prompt: Arc<dyn PermissionPrompt>,
    ) -> Self {
        Self {
            species: Arc::new(SpeciesStore::new(storage.clone(), config.species)),
            location: Arc::new(LocationStore::new(provider, prompt, config.location)),
            auth: Arc::new(AuthStore::new(storage, config.auth)),
        }
    }

    /// Load persisted state and resolve the device location.
    ///
    /// Each store initializes independently; failures are logged by the
    /// store and never abort startup.
    pub async fn initialize(&self) {
        self.auth.load_accounts();
        self.auth.load_user();

        self.species.load_species_data();
        self.species.load_sightings();

        self.location.request_location_permission().await;

        info!(
            species = self.species.species_count(),
            sightings = self.species.sightings().len(),
            signed_in = self.auth.is_signed_in(),
            has_location = self.location.location().is_some(),
            "App context initialized"
        );
    }

    /// Save a sighting attributed to the signed-in user.
    ///
    /// The profile counter is bumped after the sighting is persisted; a
    /// failure there is logged and does not undo the sighting.
    pub fn add_sighting(&self, mut input: NewSighting) -> Result<Sighting> {
        if let Some(user) = self.auth.user() {
            if input.user_name.is_none() {
                input.user_name = Some(user.name.clone());
            }
            if input.user_id.is_none() {
                input.user_id = Some(user.id.clone());
            }
        }

        let sighting = self.species.add_sighting(input)?;

        if let Err(e) = self.auth.record_sighting() {
            warn!(error = %e, "Failed to update profile sighting count");
        }

        Ok(sighting)
    }

    pub fn species(&self) -> &Arc<SpeciesStore> {
        &self.species
    }

    pub fn location(&self) -> &Arc<LocationStore> {
        &self.location
    }

    pub fn auth(&self) -> &Arc<AuthStore> {
        &self.auth
    }

    /// Tear down the context. Stores shared with other owners stay alive
    /// until their last handle drops.
    pub fn dispose(self) {
        info!(
            sightings = self.species.sightings().len(),
            "App context disposed"
        );
    }
}
