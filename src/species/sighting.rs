use crate::location::{Address, Coordinates};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Name recorded when a sighting has no signed-in user
pub const ANONYMOUS_USER: &str = "Anonymous";

/// A user-recorded observation of a species.
///
/// Created only by `SpeciesStore::add_sighting`; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    /// UUIDv7 (time-ordered, unique per sighting)
    pub id: String,

    /// Creation time, serialized as ISO 8601
    pub timestamp: DateTime<Utc>,

    pub species_id: String,
    pub species_name: String,
    #[serde(default)]
    pub scientific_name: String,

    /// Identification confidence in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Remote URL or local URI of the photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub user_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Caller-supplied fields for a new sighting.
///
/// `id` and `timestamp` are never accepted from the caller; the store
/// stamps both.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSighting {
    pub species_id: String,
    pub species_name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to "Anonymous"
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl NewSighting {
    /// Minimal input for a species picked from the catalog.
    pub fn for_species(species_id: &str, species_name: &str) -> Self {
        Self {
            species_id: species_id.to_string(),
            species_name: species_name.to_string(),
            ..Default::default()
        }
    }

    /// Checks required fields and value ranges.
    ///
    /// Rules:
    /// - species_id and species_name must be non-blank
    /// - confidence, when present, must be a finite value in [0, 1]
    /// - coordinates, when present, must be finite and within lat/lon range
    pub fn validate(&self) -> Result<(), SightingError> {
        if self.species_id.trim().is_empty() {
            return Err(SightingError::MissingSpeciesId);
        }
        if self.species_name.trim().is_empty() {
            return Err(SightingError::MissingSpeciesName);
        }

        if let Some(confidence) = self.confidence {
            if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
                return Err(SightingError::InvalidConfidence(confidence));
            }
        }

        if let Some(coords) = &self.location {
            if !coords.is_valid() {
                return Err(SightingError::InvalidCoordinates {
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                });
            }
        }

        Ok(())
    }

    /// Stamps a fresh id and the given timestamp onto the input.
    pub(crate) fn into_sighting(self, timestamp: DateTime<Utc>) -> Sighting {
        Sighting {
            id: Uuid::now_v7().to_string(),
            timestamp,
            species_id: self.species_id,
            species_name: self.species_name,
            scientific_name: self.scientific_name,
            confidence: self.confidence,
            location: self.location,
            address: self.address,
            image: self.image,
            notes: self.notes,
            user_name: self
                .user_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
            user_id: self.user_id,
        }
    }
}

/// Sighting input validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum SightingError {
    MissingSpeciesId,
    MissingSpeciesName,
    InvalidConfidence(f64),
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

impl fmt::Display for SightingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SightingError::MissingSpeciesId => write!(f, "speciesId is required"),
            SightingError::MissingSpeciesName => write!(f, "speciesName is required"),
            SightingError::InvalidConfidence(c) => {
                write!(f, "confidence must be between 0 and 1, got {}", c)
            }
            SightingError::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "invalid coordinates ({}, {})", latitude, longitude),
        }
    }
}

impl std::error::Error for SightingError {}
