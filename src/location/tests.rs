use super::*;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scriptable geolocation fake
struct FakeGeolocation {
    permissions: Mutex<Vec<PermissionStatus>>,
    position: Option<Coordinates>,
    addresses: Option<Vec<Address>>,
    permission_calls: AtomicUsize,
    position_calls: AtomicUsize,
}

impl FakeGeolocation {
    fn granted_at(latitude: f64, longitude: f64) -> Self {
        Self {
            permissions: Mutex::new(vec![PermissionStatus::Granted]),
            position: Some(Coordinates {
                latitude,
                longitude,
                accuracy: Some(12.0),
            }),
            addresses: Some(vec![Address {
                city: Some("Nairobi".to_string()),
                country: Some("Kenya".to_string()),
                ..Default::default()
            }]),
            permission_calls: AtomicUsize::new(0),
            position_calls: AtomicUsize::new(0),
        }
    }

    fn denied() -> Self {
        Self {
            permissions: Mutex::new(vec![PermissionStatus::Denied]),
            ..Self::granted_at(0.0, 0.0)
        }
    }
}

#[async_trait]
impl GeolocationProvider for FakeGeolocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);
        let mut permissions = self.permissions.lock().unwrap();
        if permissions.len() > 1 {
            Ok(permissions.remove(0))
        } else {
            Ok(permissions[0])
        }
    }

    async fn current_position(&self, _accuracy: LocationAccuracy) -> Result<Position> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        let coords = self.position.ok_or_else(|| anyhow!("no fix"))?;
        Ok(Position {
            coords,
            timestamp: Utc::now(),
        })
    }

    async fn reverse_geocode(&self, _coords: &Coordinates) -> Result<Vec<Address>> {
        self.addresses
            .clone()
            .ok_or_else(|| anyhow!("geocoder unavailable"))
    }
}

struct FailingPermission;

#[async_trait]
impl GeolocationProvider for FailingPermission {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Err(anyhow!("permission service crashed"))
    }

    async fn current_position(&self, _accuracy: LocationAccuracy) -> Result<Position> {
        Err(anyhow!("unreachable"))
    }

    async fn reverse_geocode(&self, _coords: &Coordinates) -> Result<Vec<Address>> {
        Err(anyhow!("unreachable"))
    }
}

/// Records prompts and answers with a fixed choice
struct RecordingPrompt {
    choice: PromptChoice,
    shown: AtomicUsize,
}

impl RecordingPrompt {
    fn new(choice: PromptChoice) -> Arc<Self> {
        Arc::new(Self {
            choice,
            shown: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PermissionPrompt for RecordingPrompt {
    async fn location_permission_denied(&self, title: &str, _message: &str) -> PromptChoice {
        assert_eq!(title, "Location Permission");
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.choice
    }
}

fn store_with(provider: Arc<dyn GeolocationProvider>) -> LocationStore {
    LocationStore::new(provider, Arc::new(DismissPrompt), LocationConfig::default())
}

fn snapshot_at(latitude: f64, longitude: f64) -> LocationSnapshot {
    LocationSnapshot {
        coords: Coordinates::new(latitude, longitude),
        address: Address::default(),
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn test_granted_permission_fetches_location() {
    let provider = Arc::new(FakeGeolocation::granted_at(-1.2921, 36.8219));
    let store = store_with(provider.clone());
    assert!(store.is_loading());

    store.request_location_permission().await;

    assert_eq!(store.permission(), Some(PermissionStatus::Granted));
    assert!(!store.is_loading());

    let location = store.location().expect("location should be set");
    assert_eq!(location.coords.latitude, -1.2921);
    assert_eq!(location.coords.longitude, 36.8219);
    assert_eq!(location.address.city.as_deref(), Some("Nairobi"));
    assert_eq!(provider.position_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_denied_permission_prompts_and_leaves_location_unset() {
    let provider = Arc::new(FakeGeolocation::denied());
    let prompt = RecordingPrompt::new(PromptChoice::Cancel);
    let store = LocationStore::new(provider.clone(), prompt.clone(), LocationConfig::default());

    store.request_location_permission().await;

    assert_eq!(store.permission(), Some(PermissionStatus::Denied));
    assert!(!store.is_loading());
    assert!(store.location().is_none());
    assert_eq!(prompt.shown.load(Ordering::SeqCst), 1);
    assert_eq!(provider.permission_calls.load(Ordering::SeqCst), 1);
    assert_eq!(provider.position_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_open_settings_re_requests_once_without_fetching() {
    let provider = Arc::new(FakeGeolocation {
        permissions: Mutex::new(vec![PermissionStatus::Denied, PermissionStatus::Granted]),
        ..FakeGeolocation::granted_at(1.0, 1.0)
    });
    let prompt = RecordingPrompt::new(PromptChoice::OpenSettings);
    let store = LocationStore::new(provider.clone(), prompt, LocationConfig::default());

    store.request_location_permission().await;

    assert_eq!(provider.permission_calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.permission(), Some(PermissionStatus::Granted));
    assert_eq!(provider.position_calls.load(Ordering::SeqCst), 0);
    assert!(store.location().is_none());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_permission_request_error_stops_loading() {
    let store = store_with(Arc::new(FailingPermission));

    store.request_location_permission().await;

    assert!(!store.is_loading());
    assert!(store.permission().is_none());
    assert!(store.location().is_none());
}

#[tokio::test]
async fn test_fetch_failure_uses_lagos_fallback() {
    let provider = Arc::new(FakeGeolocation {
        position: None,
        ..FakeGeolocation::granted_at(0.0, 0.0)
    });
    let store = store_with(provider);

    store.request_location_permission().await;

    let location = store.location().expect("fallback should be set");
    assert_eq!(location.address.city.as_deref(), Some("Lagos"));
    assert_eq!(location.address.country.as_deref(), Some("Nigeria"));
    assert_eq!(location.coords.latitude, 6.5244);
    assert_eq!(location.coords.longitude, 3.3792);
    assert_eq!(location.coords.accuracy, Some(100.0));
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_reverse_geocode_failure_uses_fallback() {
    let provider = Arc::new(FakeGeolocation {
        addresses: None,
        ..FakeGeolocation::granted_at(40.0, -3.7)
    });
    let store = store_with(provider);

    let snapshot = store.get_current_location().await;

    assert_eq!(snapshot.address.city.as_deref(), Some("Lagos"));
    assert_eq!(snapshot.coords.latitude, 6.5244);
}

#[tokio::test]
async fn test_empty_geocode_result_gives_empty_address() {
    let provider = Arc::new(FakeGeolocation {
        addresses: Some(vec![]),
        ..FakeGeolocation::granted_at(40.0, -3.7)
    });
    let store = store_with(provider);

    let snapshot = store.get_current_location().await;

    assert_eq!(snapshot.coords.latitude, 40.0);
    assert!(snapshot.address.is_empty());
}

#[tokio::test]
async fn test_update_location_noop_without_permission() {
    let provider = Arc::new(FakeGeolocation::granted_at(1.0, 2.0));
    let store = store_with(provider.clone());

    assert!(store.update_location().await.is_none());
    assert_eq!(provider.position_calls.load(Ordering::SeqCst), 0);

    store.request_location_permission().await;
    assert!(store.update_location().await.is_some());
    assert_eq!(provider.position_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_location_updates_broadcast() {
    let store = store_with(Arc::new(FakeGeolocation::granted_at(5.0, 5.0)));
    let mut rx = store.subscribe();

    store.request_location_permission().await;

    match rx.recv().await.unwrap() {
        LocationEvent::PermissionChanged(status) => assert_eq!(status, PermissionStatus::Granted),
        other => panic!("unexpected event: {:?}", other),
    }
    match rx.recv().await.unwrap() {
        LocationEvent::LocationUpdated(snapshot) => assert_eq!(snapshot.coords.latitude, 5.0),
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_nearby_wildlife_empty_without_location() {
    let store = store_with(Arc::new(FakeGeolocation::denied()));
    assert!(store.get_nearby_wildlife().is_empty());
}

#[tokio::test]
async fn test_nearby_wildlife_from_store_location() {
    let store = store_with(Arc::new(FakeGeolocation::granted_at(10.0, 20.0)));
    store.request_location_permission().await;

    let nearby = store.get_nearby_wildlife();
    assert_eq!(nearby.len(), 3);
    assert_eq!(nearby[0].name, "African Fish Eagle");
}

#[test]
fn test_nearby_wildlife_fixed_offsets() {
    let snapshot = snapshot_at(6.5244, 3.3792);
    let nearby = nearby_wildlife(Some(&snapshot));

    assert_eq!(nearby.len(), 3);

    let expected = [(0.01, 0.01), (-0.005, 0.008), (0.02, -0.01)];
    for (entry, (dlat, dlon)) in nearby.iter().zip(expected.iter()) {
        assert!((entry.coordinates.latitude - (6.5244 + dlat)).abs() < 1e-9);
        assert!((entry.coordinates.longitude - (3.3792 + dlon)).abs() < 1e-9);
    }

    assert_eq!(nearby[1].name, "Pied Kingfisher");
    assert_eq!(nearby[2].name, "West African Manatee");
    assert_eq!(nearby[2].rarity, Rarity::Rare);
}

#[test]
fn test_nearby_wildlife_none() {
    assert!(nearby_wildlife(None).is_empty());
}

#[test]
fn test_coordinates_validity() {
    assert!(Coordinates::new(6.5244, 3.3792).is_valid());
    assert!(!Coordinates::new(91.0, 0.0).is_valid());
    assert!(!Coordinates::new(0.0, -181.0).is_valid());
    assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
}

#[test]
fn test_location_config_deserialization() {
    let toml = r#"
        accuracy = "high"

        [fallback]
        latitude = -33.9249
        longitude = 18.4241
        accuracy = 50.0
        city = "Cape Town"
        region = "Western Cape"
        country = "South Africa"
    "#;

    let config: LocationConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.accuracy, LocationAccuracy::High);

    let snapshot = config.fallback.snapshot();
    assert_eq!(snapshot.address.city.as_deref(), Some("Cape Town"));
    assert_eq!(snapshot.coords.accuracy, Some(50.0));
}

#[test]
fn test_partial_fallback_keeps_defaults() {
    let toml = r#"
        [fallback]
        city = "Abuja"
    "#;

    let config: LocationConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.accuracy, LocationAccuracy::Balanced);
    assert_eq!(config.fallback.city, "Abuja");
    assert_eq!(config.fallback.latitude, 6.5244);
    assert_eq!(config.fallback.longitude, 3.3792);
    assert_eq!(config.fallback.accuracy, 100.0);
    assert_eq!(config.fallback.country, "Nigeria");
}
