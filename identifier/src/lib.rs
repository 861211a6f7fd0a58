//! WildLink species identification.
//!
//! Defines the interface between media capture and species identification,
//! plus a mock identifier that stands in for a real model.
//!
//! # Flow
//!
//! ```text
//!   MediaPicker (camera, gallery, microphone)
//!          ↓  media URI, or None on cancel
//!   Identifier (image or sound)
//!          ↓  ranked results
//!   Identification
//!          ↓  user picks a result
//!   NewSighting → SpeciesStore::add_sighting
//! ```
//!
//! # Core Types
//!
//! - [`Identifier`] - Trait implemented by identification backends
//! - [`MediaPicker`] - Trait implemented by capture/picker integrations
//! - [`MockIdentifier`] - Fixed results after a simulated delay
//! - [`Identification`] - One capture plus its ranked results
//!
//! # Example
//!
//! ```no_run
//! use wildlink_identifier::{
//!     capture_and_identify, IdentificationMode, MediaPicker, MockIdentifier,
//! };
//! use async_trait::async_trait;
//! use anyhow::Result;
//!
//! struct Gallery;
//!
//! #[async_trait]
//! impl MediaPicker for Gallery {
//!     async fn pick(&self, _mode: IdentificationMode) -> Result<Option<String>> {
//!         Ok(Some("file:///photos/eagle.jpg".to_string()))
//!     }
//! }
//!
//! # async fn run() -> Result<()> {
//! let identifier = MockIdentifier::default();
//! if let Some(found) =
//!     capture_and_identify(&Gallery, &identifier, IdentificationMode::Photo).await?
//! {
//!     println!("Best match: {}", found.results[0].species);
//! }
//! # Ok(())
//! # }
//! ```

mod capture;
mod identifier;
mod mock;
mod types;

pub use capture::{capture_and_identify, sighting_from_identification};
pub use identifier::{Identifier, MediaPicker};
pub use mock::{MockIdentifier, MockIdentifierConfig};
pub use types::{Identification, IdentificationMode, IdentificationResult};
