// Species catalog and sighting log

mod catalog;
mod sighting;
mod store;


pub use catalog::seed_catalog;
pub use sighting::{NewSighting, Sighting, SightingError, ANONYMOUS_USER};
pub use store::{SpeciesEvent, SpeciesStore};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable catalog entry describing a known species
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    /// Unique catalog id ("1", "2", ...)
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub category: Category,
    pub habitat: String,
    pub conservation_status: ConservationStatus,
    pub region: String,
    pub description: String,
    /// Image URLs, display order
    pub images: Vec<String>,
    #[serde(default)]
    pub sounds: Vec<String>,
    pub facts: Vec<String>,
    pub behavior: String,
    pub diet: String,
    pub size: String,
    pub lifespan: String,
    pub threats: Vec<String>,
}

impl Species {
    /// Case-insensitive substring match against the searchable fields.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.scientific_name.to_lowercase().contains(needle)
            || self.category.as_str().to_lowercase().contains(needle)
            || self.habitat.to_lowercase().contains(needle)
            || self.region.to_lowercase().contains(needle)
    }
}

/// Taxonomic grouping shown in the discover filters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Mammal,
    Bird,
    Insect,
    Reptile,
    Amphibian,
    Fish,
    Plant,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mammal => "Mammal",
            Category::Bird => "Bird",
            Category::Insect => "Insect",
            Category::Reptile => "Reptile",
            Category::Amphibian => "Amphibian",
            Category::Fish => "Fish",
            Category::Plant => "Plant",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IUCN-style conservation status, least to most threatened
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConservationStatus {
    #[serde(rename = "Least Concern")]
    LeastConcern,
    #[serde(rename = "Near Threatened")]
    NearThreatened,
    #[serde(rename = "Vulnerable")]
    Vulnerable,
    #[serde(rename = "Endangered")]
    Endangered,
    #[serde(rename = "Critically Endangered")]
    CriticallyEndangered,
}

impl ConservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConservationStatus::LeastConcern => "Least Concern",
            ConservationStatus::NearThreatened => "Near Threatened",
            ConservationStatus::Vulnerable => "Vulnerable",
            ConservationStatus::Endangered => "Endangered",
            ConservationStatus::CriticallyEndangered => "Critically Endangered",
        }
    }

    /// Endangered or Critically Endangered
    pub fn is_endangered(&self) -> bool {
        matches!(
            self,
            ConservationStatus::Endangered | ConservationStatus::CriticallyEndangered
        )
    }
}

impl fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
