use serde::{Deserialize, Serialize};
use std::fmt;
use wildlink::species::{Category, ConservationStatus};

/// What kind of media is being identified
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentificationMode {
    Photo,
    Sound,
}

impl fmt::Display for IdentificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentificationMode::Photo => write!(f, "photo"),
            IdentificationMode::Sound => write!(f, "sound"),
        }
    }
}

/// One candidate species.
///
/// Sound results carry a `sound_type` and usually no image or habitat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    /// Common name
    pub species: String,
    pub scientific_name: String,
    /// In [0, 1]
    pub confidence: f64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conservation_status: Option<ConservationStatus>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub facts: Vec<String>,
    /// "Call", "Song", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_type: Option<String>,
}

/// A captured piece of media and what it was identified as
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    pub mode: IdentificationMode,
    pub media_uri: String,
    /// Highest confidence first
    pub results: Vec<IdentificationResult>,
}

impl Identification {
    /// Most likely match, if any
    pub fn best(&self) -> Option<&IdentificationResult> {
        self.results.first()
    }
}
