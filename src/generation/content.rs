//! # Room Content
//!
//! Titles and descriptions for materialized rooms.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Source of room flavor text.
///
/// Called once per carved cell during materialization. Implementations may be
/// random internally; they take no input about the room.
pub trait ContentGenerator {
    fn title(&mut self) -> String;
    fn description(&mut self) -> String;
}

const ADJECTIVES: &[&str] = &[
    "Amber", "Buzzing", "Dripping", "Golden", "Hollow", "Humming", "Sticky", "Sunlit", "Waxen",
    "Withered",
];

const PLACES: &[&str] = &[
    "Antechamber", "Brood Cell", "Burrow", "Comb", "Gallery", "Hollow", "Nectary", "Passage",
    "Pollen Store", "Vault",
];

const OPENINGS: &[&str] = &[
    "The walls are lined with old wax",
    "Honey seeps slowly down the walls",
    "A low hum fills the air",
    "Broken comb crunches underfoot",
    "Pale light filters through the papery ceiling",
    "The floor is dusted with pollen",
];

const DETAILS: &[&str] = &[
    "and something skitters just out of sight.",
    "and the smell of clover is overwhelming.",
    "and sticky footprints lead further in.",
    "and the drone of wings echoes from somewhere close.",
    "and a torn wing lies forgotten in the corner.",
    "and the air is warm and heavy.",
];

/// Template-based hive flavor text driven by its own seeded generator.
#[derive(Debug, Clone)]
pub struct HiveContent {
    rng: StdRng,
}

impl HiveContent {
    /// Creates a content generator with a reproducible seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, words: &'static [&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

impl ContentGenerator for HiveContent {
    fn title(&mut self) -> String {
        format!("{} {}", self.pick(ADJECTIVES), self.pick(PLACES))
    }

    fn description(&mut self) -> String {
        format!("{}, {}", self.pick(OPENINGS), self.pick(DETAILS))
    }
}
