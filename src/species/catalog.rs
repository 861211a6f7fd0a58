//! Seed catalog written to the `species` key on every catalog load.

use super::{Category, ConservationStatus, Species};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The five built-in catalog entries, in display order.
pub fn seed_catalog() -> Vec<Species> {
    vec![
        Species {
            id: "1".to_string(),
            name: "African Elephant".to_string(),
            scientific_name: "Loxodonta africana".to_string(),
            category: Category::Mammal,
            habitat: "Savanna, Forest".to_string(),
            conservation_status: ConservationStatus::Vulnerable,
            region: "Sub-Saharan Africa".to_string(),
            description: "The African elephant is the largest living terrestrial animal. \
                They are known for their intelligence, strong family bonds, and complex \
                social behaviors."
                .to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1564760055775-d63b17a55c44?w=500",
                "https://images.unsplash.com/photo-1551969014-7d2c4cddf0b6?w=500",
            ]),
            sounds: strings(&["https://example.com/elephant-trumpet.mp3"]),
            facts: strings(&[
                "Can weigh up to 6,000 kg",
                "Have excellent memory",
                "Can live up to 70 years",
                "Consume 150-300 kg of vegetation daily",
            ]),
            behavior: "Highly social animals living in matriarchal herds".to_string(),
            diet: "Herbivore".to_string(),
            size: "3-4 meters tall, 4-7 meters long".to_string(),
            lifespan: "60-70 years".to_string(),
            threats: strings(&["Poaching", "Habitat loss", "Human-wildlife conflict"]),
        },
        Species {
            id: "2".to_string(),
            name: "Mountain Gorilla".to_string(),
            scientific_name: "Gorilla beringei beringei".to_string(),
            category: Category::Mammal,
            habitat: "Mountain forests".to_string(),
            conservation_status: ConservationStatus::CriticallyEndangered,
            region: "Central and East Africa".to_string(),
            description: "Mountain gorillas are a subspecies of eastern gorilla found in the \
                volcanic mountains of Rwanda, Uganda, and the Democratic Republic of Congo."
                .to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1526912284060-c4eadb04d98a?w=500",
                "https://images.unsplash.com/photo-1539681408380-2b45d4186c60?w=500",
            ]),
            sounds: strings(&["https://example.com/gorilla-grunt.mp3"]),
            facts: strings(&[
                "Share 98% of human DNA",
                "Live in groups of 10-30 individuals",
                "Led by a dominant silverback male",
                "Only about 1,000 individuals remain",
            ]),
            behavior: "Live in social groups led by silverback males".to_string(),
            diet: "Herbivore".to_string(),
            size: "1.25-1.75 meters tall".to_string(),
            lifespan: "30-40 years".to_string(),
            threats: strings(&["Habitat destruction", "Poaching", "Disease", "War"]),
        },
        Species {
            id: "3".to_string(),
            name: "Snow Leopard".to_string(),
            scientific_name: "Panthera uncia".to_string(),
            category: Category::Mammal,
            habitat: "High mountains".to_string(),
            conservation_status: ConservationStatus::Vulnerable,
            region: "Central and South Asia".to_string(),
            description: "The snow leopard is a large cat native to the mountain ranges of \
                Central and South Asia. It is well adapted to cold, arid environments."
                .to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1551882488-5e3fc1de0e78?w=500",
                "https://images.unsplash.com/photo-1540979388789-6cee28a1cdc9?w=500",
            ]),
            sounds: strings(&["https://example.com/snow-leopard-chuff.mp3"]),
            facts: strings(&[
                "Cannot roar like other big cats",
                "Have large paws that act as snowshoes",
                "Can leap up to 15 meters",
                "Estimated 4,000-6,500 remain in wild",
            ]),
            behavior: "Solitary and elusive, most active at dawn and dusk".to_string(),
            diet: "Carnivore".to_string(),
            size: "1.2-1.5 meters long".to_string(),
            lifespan: "15-18 years".to_string(),
            threats: strings(&[
                "Climate change",
                "Poaching",
                "Human-wildlife conflict",
                "Habitat loss",
            ]),
        },
        Species {
            id: "4".to_string(),
            name: "African Fish Eagle".to_string(),
            scientific_name: "Haliaeetus vocifer".to_string(),
            category: Category::Bird,
            habitat: "Rivers, lakes, coastlines".to_string(),
            conservation_status: ConservationStatus::LeastConcern,
            region: "Sub-Saharan Africa".to_string(),
            description: "The African fish eagle is a large species of eagle found throughout \
                sub-Saharan Africa. It is the national bird of several African countries."
                .to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1519904981063-b0cf448d479e?w=500",
                "https://images.unsplash.com/photo-1515002246390-7bf7e8f87b54?w=500",
            ]),
            sounds: strings(&["https://example.com/fish-eagle-call.mp3"]),
            facts: strings(&[
                "National bird of Zambia and Zimbabwe",
                "Distinctive white head and tail",
                "Excellent fishers and hunters",
                "Can dive at speeds up to 75 km/h",
            ]),
            behavior: "Often seen in pairs, builds large nests in tall trees".to_string(),
            diet: "Carnivore - primarily fish".to_string(),
            size: "63-75 cm wingspan 2-2.4 meters".to_string(),
            lifespan: "12-24 years".to_string(),
            threats: strings(&["Water pollution", "Habitat destruction", "Illegal trade"]),
        },
        Species {
            id: "5".to_string(),
            name: "Monarch Butterfly".to_string(),
            scientific_name: "Danaus plexippus".to_string(),
            category: Category::Insect,
            habitat: "Open areas, gardens, fields".to_string(),
            conservation_status: ConservationStatus::Endangered,
            region: "North America".to_string(),
            description: "The monarch butterfly is known for its incredible multi-generational \
                migration across North America, traveling up to 3,000 miles."
                .to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1444927714506-8492d94b5ba0?w=500",
                "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=500",
            ]),
            sounds: Vec::new(),
            facts: strings(&[
                "Migrates up to 3,000 miles",
                "Takes 4 generations to complete migration cycle",
                "Uses magnetic fields for navigation",
                "Population declined by 80% in recent decades",
            ]),
            behavior: "Undergoes complete metamorphosis, famous for long migrations".to_string(),
            diet: "Herbivore - milkweed plants".to_string(),
            size: "8.9-10.2 cm wingspan".to_string(),
            lifespan: "2-6 weeks (up to 8 months for migrating generation)".to_string(),
            threats: strings(&[
                "Habitat loss",
                "Pesticides",
                "Climate change",
                "Deforestation",
            ]),
        },
    ]
}
