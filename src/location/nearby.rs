use super::{Coordinates, LocationSnapshot};
use serde::{Deserialize, Serialize};

/// How often a nearby species turns up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
}

/// Demonstration "nearby" entry placed at a fixed offset from the user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyWildlife {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub distance: String,
    pub last_seen: String,
    pub rarity: Rarity,
    pub image: String,
    pub coordinates: Coordinates,
}

/// (latitude, longitude) deltas applied to the current position, entry order
pub const NEARBY_OFFSETS: [(f64, f64); 3] = [(0.01, 0.01), (-0.005, 0.008), (0.02, -0.01)];

struct Template {
    id: &'static str,
    name: &'static str,
    scientific_name: &'static str,
    distance: &'static str,
    last_seen: &'static str,
    rarity: Rarity,
    image: &'static str,
}

const TEMPLATES: [Template; 3] = [
    Template {
        id: "1",
        name: "African Fish Eagle",
        scientific_name: "Haliaeetus vocifer",
        distance: "2.3 km",
        last_seen: "2 hours ago",
        rarity: Rarity::Common,
        image: "https://example.com/african-fish-eagle.jpg",
    },
    Template {
        id: "2",
        name: "Pied Kingfisher",
        scientific_name: "Ceryle rudis",
        distance: "1.8 km",
        last_seen: "4 hours ago",
        rarity: Rarity::Common,
        image: "https://example.com/pied-kingfisher.jpg",
    },
    Template {
        id: "3",
        name: "West African Manatee",
        scientific_name: "Trichechus senegalensis",
        distance: "5.2 km",
        last_seen: "1 day ago",
        rarity: Rarity::Rare,
        image: "https://example.com/west-african-manatee.jpg",
    },
];

/// Nearby wildlife around `location`; empty when there is no location.
///
/// Not a spatial query: always the same three entries, shifted by
/// `NEARBY_OFFSETS`.
pub fn nearby_wildlife(location: Option<&LocationSnapshot>) -> Vec<NearbyWildlife> {
    let Some(location) = location else {
        return Vec::new();
    };

    TEMPLATES
        .iter()
        .zip(NEARBY_OFFSETS.iter())
        .map(|(t, (dlat, dlon))| NearbyWildlife {
            id: t.id.to_string(),
            name: t.name.to_string(),
            scientific_name: t.scientific_name.to_string(),
            distance: t.distance.to_string(),
            last_seen: t.last_seen.to_string(),
            rarity: t.rarity,
            image: t.image.to_string(),
            coordinates: Coordinates::new(
                location.coords.latitude + dlat,
                location.coords.longitude + dlon,
            ),
        })
        .collect()
}
