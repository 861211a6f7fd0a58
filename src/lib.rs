// Local key-value persistence
pub mod storage;

// Configuration loading
pub mod config;

// Species catalog and sighting log
pub mod species;

// Device location and nearby wildlife
pub mod location;

// Accounts and session
pub mod auth;

// Store wiring and lifecycle
pub mod app;

pub use app::{open_storage, AppContext};
pub use config::{load_config, WildlinkConfig};
