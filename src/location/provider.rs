use super::{Address, Coordinates, LocationAccuracy, PermissionStatus, Position};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

/// Device geolocation service.
///
/// Implemented by the platform binding (or a fake in tests). The location
/// store imposes no retry policy: each call either returns or fails once.
///
/// # Example
/// ```no_run
/// use wildlink::location::{
///     Address, Coordinates, GeolocationProvider, LocationAccuracy, PermissionStatus, Position,
/// };
/// use async_trait::async_trait;
/// use anyhow::Result;
///
/// struct AlwaysHere;
///
/// #[async_trait]
/// impl GeolocationProvider for AlwaysHere {
///     async fn request_permission(&self) -> Result<PermissionStatus> {
///         Ok(PermissionStatus::Granted)
///     }
///
///     async fn current_position(&self, _accuracy: LocationAccuracy) -> Result<Position> {
///         Ok(Position {
///             coords: Coordinates::new(-1.2921, 36.8219),
///             timestamp: chrono::Utc::now(),
///         })
///     }
///
///     async fn reverse_geocode(&self, _coords: &Coordinates) -> Result<Vec<Address>> {
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Ask for foreground location permission.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Fetch the current device position.
    async fn current_position(&self, accuracy: LocationAccuracy) -> Result<Position>;

    /// Resolve coordinates to candidate addresses, best match first.
    async fn reverse_geocode(&self, coords: &Coordinates) -> Result<Vec<Address>>;
}

/// User's answer to the permission-denied prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptChoice {
    Cancel,
    OpenSettings,
}

/// Surfaces a blocking message to the user and reports their choice.
#[async_trait]
pub trait PermissionPrompt: Send + Sync {
    async fn location_permission_denied(&self, title: &str, message: &str) -> PromptChoice;
}

/// Prompt that never opens settings, for headless use.
pub struct DismissPrompt;

#[async_trait]
impl PermissionPrompt for DismissPrompt {
    async fn location_permission_denied(&self, title: &str, message: &str) -> PromptChoice {
        tracing::warn!(title, message, "Location permission denied");
        PromptChoice::Cancel
    }
}

/// Provider that always reports the same position.
///
/// Used by the `wildlink` binary where no positioning hardware exists.
pub struct FixedGeolocation {
    coords: Coordinates,
    address: Option<Address>,
}

impl FixedGeolocation {
    pub fn new(coords: Coordinates, address: Option<Address>) -> Self {
        Self { coords, address }
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self, _accuracy: LocationAccuracy) -> Result<Position> {
        Ok(Position {
            coords: self.coords,
            timestamp: Utc::now(),
        })
    }

    async fn reverse_geocode(&self, _coords: &Coordinates) -> Result<Vec<Address>> {
        Ok(self.address.iter().cloned().collect())
    }
}
