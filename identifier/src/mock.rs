//! Stand-in identifier with canned results.

use crate::identifier::Identifier;
use crate::types::IdentificationResult;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use wildlink::species::{Category, ConservationStatus};

/// Simulated processing delays
#[derive(Debug, Clone, Deserialize)]
pub struct MockIdentifierConfig {
    #[serde(default = "default_image_delay_ms")]
    pub image_delay_ms: u64,
    #[serde(default = "default_sound_delay_ms")]
    pub sound_delay_ms: u64,
}

fn default_image_delay_ms() -> u64 {
    2000
}

fn default_sound_delay_ms() -> u64 {
    1500
}

impl Default for MockIdentifierConfig {
    fn default() -> Self {
        Self {
            image_delay_ms: default_image_delay_ms(),
            sound_delay_ms: default_sound_delay_ms(),
        }
    }
}

/// Returns the same ranked results for every input after a fixed delay.
#[derive(Debug, Clone, Default)]
pub struct MockIdentifier {
    config: MockIdentifierConfig,
}

impl MockIdentifier {
    pub fn new(config: MockIdentifierConfig) -> Self {
        Self { config }
    }

    /// No delay, for tests and demos
    pub fn instant() -> Self {
        Self::new(MockIdentifierConfig {
            image_delay_ms: 0,
            sound_delay_ms: 0,
        })
    }
}

#[async_trait]
impl Identifier for MockIdentifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn identify_image(&self, uri: &str) -> Result<Vec<IdentificationResult>> {
        debug!(uri, delay_ms = self.config.image_delay_ms, "Identifying image");
        tokio::time::sleep(Duration::from_millis(self.config.image_delay_ms)).await;

        let results = image_results();
        info!(uri, count = results.len(), "Image identified");
        Ok(results)
    }

    async fn identify_sound(&self, uri: &str) -> Result<Vec<IdentificationResult>> {
        debug!(uri, delay_ms = self.config.sound_delay_ms, "Identifying sound");
        tokio::time::sleep(Duration::from_millis(self.config.sound_delay_ms)).await;

        let results = sound_results();
        info!(uri, count = results.len(), "Sound identified");
        Ok(results)
    }
}

fn image_results() -> Vec<IdentificationResult> {
    vec![
        IdentificationResult {
            species: "African Fish Eagle".to_string(),
            scientific_name: "Haliaeetus vocifer".to_string(),
            confidence: 0.89,
            category: Category::Bird,
            conservation_status: Some(ConservationStatus::LeastConcern),
            description: "The African fish eagle is a large species of eagle found throughout sub-Saharan Africa.".to_string(),
            habitat: Some("Rivers, lakes, coastlines".to_string()),
            image: Some("https://images.unsplash.com/photo-1519904981063-b0cf448d479e?w=500".to_string()),
            facts: vec![
                "National bird of Zambia and Zimbabwe".to_string(),
                "Distinctive white head and tail".to_string(),
                "Excellent fishers and hunters".to_string(),
            ],
            sound_type: None,
        },
        IdentificationResult {
            species: "Pied Kingfisher".to_string(),
            scientific_name: "Ceryle rudis".to_string(),
            confidence: 0.76,
            category: Category::Bird,
            conservation_status: Some(ConservationStatus::LeastConcern),
            description: "A water kingfisher widely distributed across Africa and Asia.".to_string(),
            habitat: Some("Rivers, lakes, coastal areas".to_string()),
            image: Some("https://images.unsplash.com/photo-1544550285-f813152fb2fd?w=500".to_string()),
            facts: vec![
                "Can hover over water while hunting".to_string(),
                "Black and white plumage pattern".to_string(),
                "Nests in burrows in riverbanks".to_string(),
            ],
            sound_type: None,
        },
    ]
}

fn sound_results() -> Vec<IdentificationResult> {
    vec![IdentificationResult {
        species: "African Grey Parrot".to_string(),
        scientific_name: "Psittacus erithacus".to_string(),
        confidence: 0.82,
        category: Category::Bird,
        conservation_status: None,
        description: "Highly intelligent parrot known for its ability to mimic human speech.".to_string(),
        habitat: None,
        image: None,
        facts: vec![
            "Can live up to 50-60 years".to_string(),
            "Excellent mimics".to_string(),
            "Highly social birds".to_string(),
        ],
        sound_type: Some("Call".to_string()),
    }]
}
