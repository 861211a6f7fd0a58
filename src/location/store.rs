use super::{
    nearby_wildlife, GeolocationProvider, LocationConfig, LocationSnapshot, NearbyWildlife,
    PermissionPrompt, PermissionStatus, PromptChoice,
};
use anyhow::{Context, Result};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

const PERMISSION_TITLE: &str = "Location Permission";
const PERMISSION_MESSAGE: &str = "WildLink needs location access to show nearby wildlife \
    and connect you with local conservationists.";

/// Change notification broadcast to subscribers
#[derive(Clone, Debug)]
pub enum LocationEvent {
    PermissionChanged(PermissionStatus),
    LocationUpdated(LocationSnapshot),
}

#[derive(Debug)]
struct LocationState {
    location: Option<LocationSnapshot>,
    permission: Option<PermissionStatus>,
    loading: bool,
}

/// Owns the device location and the location permission state.
///
/// Lifecycle: `INIT -> GRANTED -> fetched -> READY`, or
/// `INIT -> DENIED -> READY` (no location). A failed fetch still ends in
/// READY, holding the configured fallback snapshot.
pub struct LocationStore {
    provider: Arc<dyn GeolocationProvider>,
    prompt: Arc<dyn PermissionPrompt>,
    config: LocationConfig,
    state: RwLock<LocationState>,
    events_tx: broadcast::Sender<LocationEvent>,
}

impl LocationStore {
    pub fn new(
        provider: Arc<dyn GeolocationProvider>,
        prompt: Arc<dyn PermissionPrompt>,
        config: LocationConfig,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(100);

        Self {
            provider,
            prompt,
            config,
            state: RwLock::new(LocationState {
                location: None,
                permission: None,
                loading: true,
            }),
            events_tx,
        }
    }

    /// Request permission; fetch the location if granted.
    ///
    /// On denial the user is told why location is needed and offered the
    /// settings screen. Choosing settings re-requests once; there is no
    /// retry loop and no fetch in that branch.
    pub async fn request_location_permission(&self) {
        let status = match self.provider.request_permission().await {
            Ok(status) => status,
            Err(e) => {
                error!(error = %e, "Error requesting location permission");
                self.set_loading(false);
                return;
            }
        };

        self.set_permission(status);

        if status == PermissionStatus::Granted {
            self.get_current_location().await;
            return;
        }

        let choice = self
            .prompt
            .location_permission_denied(PERMISSION_TITLE, PERMISSION_MESSAGE)
            .await;

        if choice == PromptChoice::OpenSettings {
            match self.provider.request_permission().await {
                Ok(status) => self.set_permission(status),
                Err(e) => warn!(error = %e, "Permission re-request failed"),
            }
        }

        self.set_loading(false);
    }

    /// Fetch position and address and store the snapshot.
    ///
    /// Never fails: any error (including reverse geocoding) is logged and
    /// replaced by the fallback snapshot.
    pub async fn get_current_location(&self) -> LocationSnapshot {
        self.set_loading(true);

        let snapshot = match self.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "Error getting location, using fallback");
                self.config.fallback.snapshot()
            }
        };

        {
            let mut state = self.state.write().unwrap();
            state.location = Some(snapshot.clone());
            state.loading = false;
        }

        info!(
            latitude = snapshot.coords.latitude,
            longitude = snapshot.coords.longitude,
            city = snapshot.address.city.as_deref().unwrap_or(""),
            "Location updated"
        );
        let _ = self
            .events_tx
            .send(LocationEvent::LocationUpdated(snapshot.clone()));

        snapshot
    }

    async fn fetch_snapshot(&self) -> Result<LocationSnapshot> {
        let position = self
            .provider
            .current_position(self.config.accuracy)
            .await
            .context("Failed to get current position")?;

        let addresses = self
            .provider
            .reverse_geocode(&position.coords)
            .await
            .context("Failed to reverse geocode position")?;

        Ok(LocationSnapshot {
            coords: position.coords,
            address: addresses.into_iter().next().unwrap_or_default(),
            timestamp: position.timestamp,
        })
    }

    /// Re-fetch if permission was granted earlier; otherwise do nothing.
    pub async fn update_location(&self) -> Option<LocationSnapshot> {
        if self.permission() == Some(PermissionStatus::Granted) {
            Some(self.get_current_location().await)
        } else {
            None
        }
    }

    /// Demonstration wildlife around the current location
    pub fn get_nearby_wildlife(&self) -> Vec<NearbyWildlife> {
        let state = self.state.read().unwrap();
        nearby_wildlife(state.location.as_ref())
    }

    pub fn location(&self) -> Option<LocationSnapshot> {
        self.state.read().unwrap().location.clone()
    }

    /// `None` until permission has been requested
    pub fn permission(&self) -> Option<PermissionStatus> {
        self.state.read().unwrap().permission
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    /// Subscribe to permission and location changes
    pub fn subscribe(&self) -> broadcast::Receiver<LocationEvent> {
        self.events_tx.subscribe()
    }

    fn set_permission(&self, status: PermissionStatus) {
        self.state.write().unwrap().permission = Some(status);
        info!(status = ?status, "Location permission");
        let _ = self.events_tx.send(LocationEvent::PermissionChanged(status));
    }

    fn set_loading(&self, loading: bool) {
        self.state.write().unwrap().loading = loading;
    }
}
