use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// Re-export config types owned by other modules
pub use crate::location::{FallbackLocation, LocationConfig};

/// Default number of sightings returned by `get_recent_sightings_default`
pub const DEFAULT_RECENT_SIGHTINGS: usize = 10;

/// Complete WildLink configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WildlinkConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub species: SpeciesConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Where persisted state lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// SQLite database file (ignored for the memory backend)
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    "wildlink.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}

/// What `load_species_data` does with a cached catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Always replace the cache with the seed catalog
    #[default]
    Overwrite,
    /// Seed only when the cache is missing or empty
    IfEmpty,
}

/// Species store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesConfig {
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    #[serde(default = "default_recent_sightings_limit")]
    pub recent_sightings_limit: usize,
}

fn default_recent_sightings_limit() -> usize {
    DEFAULT_RECENT_SIGHTINGS
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            seed_policy: SeedPolicy::default(),
            recent_sightings_limit: default_recent_sightings_limit(),
        }
    }
}

/// Auth store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Register demo@wildlink.com on startup if missing
    #[serde(default = "default_seed_demo_account")]
    pub seed_demo_account: bool,
}

fn default_seed_demo_account() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            seed_demo_account: default_seed_demo_account(),
        }
    }
}

impl WildlinkConfig {
    /// Apply `WILDLINK_*` environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("WILDLINK_DB_PATH") {
            if !v.is_empty() {
                self.storage.path = v;
            }
        }
        if let Ok(v) = std::env::var("WILDLINK_STORAGE_BACKEND") {
            match v.to_lowercase().as_str() {
                "sqlite" => self.storage.backend = StorageBackend::Sqlite,
                "memory" => self.storage.backend = StorageBackend::Memory,
                other => tracing::warn!(value = other, "Ignoring unknown WILDLINK_STORAGE_BACKEND"),
            }
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<WildlinkConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: WildlinkConfig =
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationAccuracy;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WildlinkConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.path, "wildlink.db");
        assert_eq!(config.species.seed_policy, SeedPolicy::Overwrite);
        assert_eq!(config.species.recent_sightings_limit, 10);
        assert_eq!(config.location.accuracy, LocationAccuracy::Balanced);
        assert_eq!(config.location.fallback.city, "Lagos");
        assert!(config.auth.seed_demo_account);
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
            [storage]
            backend = "memory"
            path = "/tmp/wildlink-test.db"

            [species]
            seed_policy = "if_empty"
            recent_sightings_limit = 5

            [location]
            accuracy = "high"

            [auth]
            seed_demo_account = false
        "#;

        let config: WildlinkConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, "/tmp/wildlink-test.db");
        assert_eq!(config.species.seed_policy, SeedPolicy::IfEmpty);
        assert_eq!(config.species.recent_sightings_limit, 5);
        assert_eq!(config.location.accuracy, LocationAccuracy::High);
        assert_eq!(config.auth.seed_demo_account, false);
    }

    #[test]
    fn test_partial_config() {
        // Missing sections use defaults
        let toml = r#"
            [species]
            recent_sightings_limit = 3
        "#;

        let config: WildlinkConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.species.recent_sightings_limit, 3);
        assert_eq!(config.species.seed_policy, SeedPolicy::Overwrite); // Default
        assert_eq!(config.storage.path, "wildlink.db"); // Default
        assert_eq!(config.location.fallback.latitude, 6.5244); // Default
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\nbackend = \"memory\"").unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/wildlink.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wildlink.toml"));
    }
}
