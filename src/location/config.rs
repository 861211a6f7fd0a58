use super::{Address, Coordinates, LocationAccuracy, LocationSnapshot};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Configuration for the location store
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Accuracy requested for position fixes
    #[serde(default)]
    pub accuracy: LocationAccuracy,

    /// Snapshot substituted when a fetch fails
    #[serde(default)]
    pub fallback: FallbackLocation,
}

/// Location shown when the device position cannot be determined
///
/// Missing fields keep their Lagos defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub city: String,
    pub region: String,
    pub country: String,
}

impl Default for FallbackLocation {
    fn default() -> Self {
        // Lagos, Nigeria
        Self {
            latitude: 6.5244,
            longitude: 3.3792,
            accuracy: 100.0,
            city: "Lagos".to_string(),
            region: "Lagos".to_string(),
            country: "Nigeria".to_string(),
        }
    }
}

impl FallbackLocation {
    /// Build a snapshot stamped with the current time
    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            coords: Coordinates {
                latitude: self.latitude,
                longitude: self.longitude,
                accuracy: Some(self.accuracy),
            },
            address: Address {
                city: Some(self.city.clone()),
                region: Some(self.region.clone()),
                country: Some(self.country.clone()),
                ..Default::default()
            },
            timestamp: Utc::now(),
        }
    }
}
