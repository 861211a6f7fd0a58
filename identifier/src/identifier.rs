use crate::types::{IdentificationMode, IdentificationResult};
use anyhow::Result;
use async_trait::async_trait;

/// Species identification backend.
///
/// Implementations receive a media URI produced by a [`MediaPicker`] and
/// return candidate species ranked by confidence, best first.
///
/// # Example
/// ```no_run
/// use wildlink_identifier::{Identifier, IdentificationResult};
/// use async_trait::async_trait;
/// use anyhow::Result;
///
/// struct NothingFound;
///
/// #[async_trait]
/// impl Identifier for NothingFound {
///     fn name(&self) -> &str {
///         "nothing"
///     }
///
///     async fn identify_image(&self, _uri: &str) -> Result<Vec<IdentificationResult>> {
///         Ok(vec![])
///     }
///
///     async fn identify_sound(&self, _uri: &str) -> Result<Vec<IdentificationResult>> {
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait Identifier: Send + Sync {
    /// Short lowercase name used in logs
    fn name(&self) -> &str;

    /// Identify species in a photo.
    ///
    /// # Returns
    /// * `Ok(results)` - Candidates, possibly empty
    /// * `Err(...)` - The media could not be processed
    async fn identify_image(&self, uri: &str) -> Result<Vec<IdentificationResult>>;

    /// Identify species from a recorded call or song.
    async fn identify_sound(&self, uri: &str) -> Result<Vec<IdentificationResult>>;
}

/// Camera, gallery or microphone integration.
#[async_trait]
pub trait MediaPicker: Send + Sync {
    /// Capture or pick media for `mode`.
    ///
    /// Returns `Ok(None)` when the user cancels.
    async fn pick(&self, mode: IdentificationMode) -> Result<Option<String>>;
}
