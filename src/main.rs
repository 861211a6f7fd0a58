use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use wildlink::config::{load_config, WildlinkConfig};
use wildlink::location::{Coordinates, DismissPrompt, FixedGeolocation};
use wildlink::{open_storage, AppContext};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildlink=info".into()),
        )
        .init();

    info!("WildLink starting...");

    let mut config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => WildlinkConfig::default(),
    };
    config.apply_env_overrides();

    let storage = open_storage(&config.storage)?;

    // No positioning hardware here: report the configured fallback spot
    let fallback = config.location.fallback.snapshot();
    let provider = Arc::new(FixedGeolocation::new(
        Coordinates::new(fallback.coords.latitude, fallback.coords.longitude),
        Some(fallback.address),
    ));

    let app = AppContext::new(config, storage, provider, Arc::new(DismissPrompt));
    app.initialize().await;

    let species = app.species();
    info!(
        species = species.species_count(),
        endangered = species.get_endangered_species().len(),
        sightings = species.sightings().len(),
        "Catalog ready"
    );
    for sighting in species.get_recent_sightings_default() {
        info!(
            species = %sighting.species_name,
            user = %sighting.user_name,
            at = %sighting.timestamp,
            "Recent sighting"
        );
    }

    if let Some(location) = app.location().location() {
        info!(
            latitude = location.coords.latitude,
            longitude = location.coords.longitude,
            city = location.address.city.as_deref().unwrap_or("unknown"),
            nearby = app.location().get_nearby_wildlife().len(),
            "Location resolved"
        );
    }

    app.dispose();
    Ok(())
}
