use super::*;
use crate::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::location::{
    Address, Coordinates, DismissPrompt, FixedGeolocation, LocationAccuracy, PermissionStatus,
    Position,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Provider that grants permission but never gets a fix
struct NoFixGeolocation;

#[async_trait]
impl GeolocationProvider for NoFixGeolocation {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self, _accuracy: LocationAccuracy) -> Result<Position> {
        Err(anyhow!("location services unavailable"))
    }

    async fn reverse_geocode(&self, _coords: &Coordinates) -> Result<Vec<Address>> {
        Ok(Vec::new())
    }
}

fn memory_context(provider: Arc<dyn GeolocationProvider>) -> AppContext {
    let storage = open_storage(&StorageConfig {
        backend: StorageBackend::Memory,
        path: String::new(),
    })
    .unwrap();
    AppContext::new(
        WildlinkConfig::default(),
        storage,
        provider,
        Arc::new(DismissPrompt),
    )
}

fn nairobi() -> Arc<dyn GeolocationProvider> {
    Arc::new(FixedGeolocation::new(
        Coordinates::new(-1.2921, 36.8219),
        Some(Address {
            city: Some("Nairobi".to_string()),
            ..Default::default()
        }),
    ))
}

#[tokio::test]
async fn test_initialize_loads_every_store() {
    let app = memory_context(nairobi());
    app.initialize().await;

    assert_eq!(app.species().species_count(), 5);
    assert!(!app.species().is_loading());
    assert_eq!(app.auth().account_count(), 1);
    assert_eq!(app.location().permission(), Some(PermissionStatus::Granted));

    let snapshot = app.location().location().unwrap();
    assert_eq!(snapshot.coords.latitude, -1.2921);
    assert_eq!(snapshot.address.city.as_deref(), Some("Nairobi"));
    assert_eq!(app.location().get_nearby_wildlife().len(), 3);

    app.dispose();
}

#[tokio::test]
async fn test_initialize_with_failed_fix_uses_fallback() {
    let app = memory_context(Arc::new(NoFixGeolocation));
    app.initialize().await;

    let snapshot = app.location().location().unwrap();
    assert_eq!(snapshot.address.city.as_deref(), Some("Lagos"));
    assert_eq!(snapshot.coords.latitude, 6.5244);
    assert!(!app.location().is_loading());
}

#[tokio::test]
async fn test_add_sighting_attributes_signed_in_user() {
    let app = memory_context(nairobi());
    app.initialize().await;

    let user = app.auth().login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
    let sighting = app
        .add_sighting(NewSighting::for_species("4", "African Fish Eagle"))
        .unwrap();

    assert_eq!(sighting.user_name, user.name);
    assert_eq!(sighting.user_id.as_deref(), Some(user.id.as_str()));
    assert_eq!(app.auth().user().unwrap().sightings, 1);
    assert_eq!(app.species().get_sightings_by_user(&user.id).len(), 1);
}

#[tokio::test]
async fn test_add_sighting_signed_out_is_anonymous() {
    let app = memory_context(nairobi());
    app.initialize().await;

    let sighting = app
        .add_sighting(NewSighting::for_species("1", "African Elephant"))
        .unwrap();
    assert_eq!(sighting.user_name, "Anonymous");
    assert!(sighting.user_id.is_none());
}

#[tokio::test]
async fn test_add_sighting_keeps_explicit_user_name() {
    let app = memory_context(nairobi());
    app.initialize().await;
    app.auth().login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();

    let mut input = NewSighting::for_species("1", "African Elephant");
    input.user_name = Some("Field Team".to_string());
    let sighting = app.add_sighting(input).unwrap();
    assert_eq!(sighting.user_name, "Field Team");
}

#[tokio::test]
async fn test_add_sighting_invalid_input_leaves_profile_alone() {
    let app = memory_context(nairobi());
    app.initialize().await;
    app.auth().login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();

    assert!(app.add_sighting(NewSighting::default()).is_err());
    assert_eq!(app.auth().user().unwrap().sightings, 0);
    assert!(app.species().sightings().is_empty());
}

#[test]
fn test_open_sqlite_storage_bad_path() {
    let err = open_storage(&StorageConfig {
        backend: StorageBackend::Sqlite,
        path: "/nonexistent/dir/wildlink.db".to_string(),
    })
    .err()
    .unwrap();
    assert!(format!("{:#}", err).contains("/nonexistent/dir/wildlink.db"));
}
