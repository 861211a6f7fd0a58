use crate::identifier::{Identifier, MediaPicker};
use crate::types::{Identification, IdentificationMode, IdentificationResult};
use anyhow::{Context, Result};
use tracing::info;
use wildlink::auth::User;
use wildlink::location::LocationSnapshot;
use wildlink::species::{NewSighting, ANONYMOUS_USER};

/// Pick media for `mode` and identify it.
///
/// Returns `Ok(None)` when the picker is cancelled. Results are ordered by
/// descending confidence whatever order the identifier returned them in.
pub async fn capture_and_identify(
    picker: &dyn MediaPicker,
    identifier: &dyn Identifier,
    mode: IdentificationMode,
) -> Result<Option<Identification>> {
    let Some(media_uri) = picker
        .pick(mode)
        .await
        .with_context(|| format!("Failed to capture {}", mode))?
    else {
        info!(%mode, "Capture cancelled");
        return Ok(None);
    };

    let mut results = match mode {
        IdentificationMode::Photo => identifier.identify_image(&media_uri).await,
        IdentificationMode::Sound => identifier.identify_sound(&media_uri).await,
    }
    .with_context(|| format!("Failed to identify {} with {}", mode, identifier.name()))?;

    results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    info!(
        %mode,
        identifier = identifier.name(),
        count = results.len(),
        best = results.first().map(|r| r.species.as_str()).unwrap_or("none"),
        "Identification complete"
    );

    Ok(Some(Identification {
        mode,
        media_uri,
        results,
    }))
}

/// Build the sighting saved when the user accepts `result`.
///
/// The species name doubles as the species id. Only photos attach their
/// media as the sighting image.
pub fn sighting_from_identification(
    result: &IdentificationResult,
    identification: &Identification,
    location: Option<&LocationSnapshot>,
    user: Option<&User>,
) -> NewSighting {
    NewSighting {
        species_id: result.species.clone(),
        species_name: result.species.clone(),
        scientific_name: result.scientific_name.clone(),
        confidence: Some(result.confidence),
        location: location.map(|l| l.coords),
        address: location.map(|l| l.address.clone()),
        image: match identification.mode {
            IdentificationMode::Photo => Some(identification.media_uri.clone()),
            IdentificationMode::Sound => None,
        },
        notes: Some(String::new()),
        user_name: Some(
            user.map(|u| u.name.clone())
                .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
        ),
        user_id: user.map(|u| u.id.clone()),
    }
}
