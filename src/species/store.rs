use super::{seed_catalog, Category, NewSighting, Sighting, Species};
use crate::config::{SeedPolicy, SpeciesConfig};
use crate::location::NearbyWildlife;
use crate::storage::{read_json, write_json, KeyValueStore, SIGHTINGS_KEY, SPECIES_KEY};
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Change notification broadcast to subscribers
#[derive(Clone, Debug)]
pub enum SpeciesEvent {
    CatalogLoaded { count: usize },
    SightingsLoaded { count: usize },
    SightingAdded(Sighting),
}

/// Owns the species catalog and the user's sighting log.
///
/// Both lists are mirrored to the `species` and `sightings` keys of the
/// shared key-value store. The sighting log is kept newest-first.
pub struct SpeciesStore {
    storage: Arc<dyn KeyValueStore>,
    config: SpeciesConfig,
    species: RwLock<Vec<Species>>,
    sightings: RwLock<Vec<Sighting>>,
    /// True until the first catalog load finishes (successfully or not)
    loading: AtomicBool,
    events_tx: broadcast::Sender<SpeciesEvent>,
}

impl SpeciesStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, config: SpeciesConfig) -> Self {
        let (events_tx, _) = broadcast::channel(100);

        Self {
            storage,
            config,
            species: RwLock::new(Vec::new()),
            sightings: RwLock::new(Vec::new()),
            loading: AtomicBool::new(true),
            events_tx,
        }
    }

    /// Load the catalog: read the cache, then apply the seed policy.
    ///
    /// Failures are logged, never returned. `loading` is false afterwards
    /// either way.
    pub fn load_species_data(&self) {
        if let Err(e) = self.try_load_species_data() {
            error!(error = %e, "Error loading species data");
        }
        self.loading.store(false, Ordering::SeqCst);
    }

    fn try_load_species_data(&self) -> Result<()> {
        // An unreadable or outdated cache counts as no cache
        let cached = match read_json::<Vec<Species>>(self.storage.as_ref(), SPECIES_KEY) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(error = %e, "Ignoring unusable species cache");
                None
            }
        };

        if let Some(cached) = cached {
            let count = cached.len();
            *self.species.write().unwrap() = cached;

            if self.config.seed_policy == SeedPolicy::IfEmpty && count > 0 {
                info!(count, "Species catalog restored from cache");
                let _ = self.events_tx.send(SpeciesEvent::CatalogLoaded { count });
                return Ok(());
            }
        }

        let seed = seed_catalog();
        let count = seed.len();
        *self.species.write().unwrap() = seed.clone();
        let _ = self.events_tx.send(SpeciesEvent::CatalogLoaded { count });

        write_json(self.storage.as_ref(), SPECIES_KEY, &seed)
            .context("Failed to cache seed catalog")?;

        info!(count, "Species catalog seeded");
        Ok(())
    }

    /// Restore the sighting log from storage. No seeding; failures are logged.
    pub fn load_sightings(&self) {
        match read_json::<Vec<Sighting>>(self.storage.as_ref(), SIGHTINGS_KEY) {
            Ok(Some(stored)) => {
                let count = stored.len();
                *self.sightings.write().unwrap() = stored;
                info!(count, "Sightings loaded");
                let _ = self.events_tx.send(SpeciesEvent::SightingsLoaded { count });
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "Error loading sightings");
            }
        }
    }

    /// Validate, stamp and prepend a new sighting, then persist the full log.
    ///
    /// The write lock is held across the persist, so concurrent callers
    /// cannot lose each other's writes. On a storage error the in-memory
    /// log is left unchanged and the error is returned.
    pub fn add_sighting(&self, input: NewSighting) -> Result<Sighting> {
        input.validate()?;

        let mut sightings = self.sightings.write().unwrap();
        let sighting = input.into_sighting(Utc::now());

        let mut updated = Vec::with_capacity(sightings.len() + 1);
        updated.push(sighting.clone());
        updated.extend(sightings.iter().cloned());

        if let Err(e) = write_json(self.storage.as_ref(), SIGHTINGS_KEY, &updated) {
            error!(error = %e, "Error adding sighting");
            return Err(e.context("Failed to persist sightings"));
        }
        *sightings = updated;
        drop(sightings);

        info!(
            sighting_id = %sighting.id,
            species = %sighting.species_name,
            "Sighting added"
        );
        let _ = self.events_tx.send(SpeciesEvent::SightingAdded(sighting.clone()));

        Ok(sighting)
    }

    /// First catalog entry with the given id
    pub fn get_species_by_id(&self, id: &str) -> Option<Species> {
        self.species
            .read()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// All catalog entries in `category`, catalog order
    pub fn get_species_by_category(&self, category: Category) -> Vec<Species> {
        self.species
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over name, scientific name,
    /// category, habitat and region.
    ///
    /// An empty query returns the whole catalog.
    pub fn search_species(&self, query: &str) -> Vec<Species> {
        let species = self.species.read().unwrap();
        if query.is_empty() {
            return species.clone();
        }

        let needle = query.to_lowercase();
        species.iter().filter(|s| s.matches(&needle)).cloned().collect()
    }

    /// Copy of the log sorted newest-first by timestamp, at most `limit` long.
    ///
    /// The stored order is not touched.
    pub fn get_recent_sightings(&self, limit: usize) -> Vec<Sighting> {
        let mut recent = self.sightings.read().unwrap().clone();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(limit);
        recent
    }

    /// `get_recent_sightings` with the configured default limit
    pub fn get_recent_sightings_default(&self) -> Vec<Sighting> {
        self.get_recent_sightings(self.config.recent_sightings_limit)
    }

    /// Endangered and Critically Endangered entries, catalog order
    pub fn get_endangered_species(&self) -> Vec<Species> {
        self.species
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.conservation_status.is_endangered())
            .cloned()
            .collect()
    }

    /// Catalog entries whose name appears in a nearby-wildlife list
    pub fn species_matching_nearby(&self, nearby: &[NearbyWildlife]) -> Vec<Species> {
        self.species
            .read()
            .unwrap()
            .iter()
            .filter(|s| nearby.iter().any(|n| n.name == s.name))
            .cloned()
            .collect()
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for s in self.species.read().unwrap().iter() {
            if !categories.contains(&s.category) {
                categories.push(s.category);
            }
        }
        categories
    }

    /// Sightings recorded by `user_id`, stored order
    pub fn get_sightings_by_user(&self, user_id: &str) -> Vec<Sighting> {
        self.sightings
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect()
    }

    /// Snapshot of the catalog
    pub fn species(&self) -> Vec<Species> {
        self.species.read().unwrap().clone()
    }

    /// Snapshot of the sighting log, newest first
    pub fn sightings(&self) -> Vec<Sighting> {
        self.sightings.read().unwrap().clone()
    }

    pub fn species_count(&self) -> usize {
        self.species.read().unwrap().len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Subscribe to catalog and sighting changes
    pub fn subscribe(&self) -> broadcast::Receiver<SpeciesEvent> {
        self.events_tx.subscribe()
    }
}
