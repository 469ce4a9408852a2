//! # Monster Catalog
//!
//! Static reference data for the monsters that can occupy a room. The catalog
//! is ordered by tier, weakest first, and is seeded into the store once
//! before any room exists.

use crate::{config, HiveError, HiveResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A monster definition as it is written into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterSpec {
    /// Unique display name, also the store lookup key
    pub name: String,
    /// Flavor text
    pub description: String,
    /// Honey the player gains by beating this monster
    pub honey_gained: u32,
    /// Honey the player loses when beaten by this monster
    pub honey_lost: u32,
    /// Experience level of the monster
    pub xp: u32,
    /// Experience the player gains from the encounter
    pub xp_gained: u32,
}

impl MonsterSpec {
    /// Creates a monster definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        honey_gained: u32,
        honey_lost: u32,
        xp: u32,
        xp_gained: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            honey_gained,
            honey_lost,
            xp,
            xp_gained,
        }
    }

    /// Reads a catalog from a JSON array and validates it.
    pub fn load_catalog(path: impl AsRef<Path>) -> HiveResult<Vec<MonsterSpec>> {
        let raw = fs::read_to_string(path)?;
        let catalog: Vec<MonsterSpec> = serde_json::from_str(&raw)?;
        validate_catalog(&catalog)?;
        Ok(catalog)
    }
}

/// The default hive catalog, one entry per encounter tier.
///
/// # Examples
///
/// ```
/// use hivegen::bee_catalog;
///
/// let catalog = bee_catalog();
/// assert_eq!(catalog.len(), 10);
/// assert_eq!(catalog[0].name, "Venus Fly Trap");
/// assert_eq!(catalog[9].name, "Queen Bee");
/// ```
pub fn bee_catalog() -> Vec<MonsterSpec> {
    vec![
        MonsterSpec::new("Venus Fly Trap", "An angry little bugger", 2, 1, 1, 1),
        MonsterSpec::new("Mining Bee", "The guy likes to find treasure", 10, 2, 10, 2),
        MonsterSpec::new("Carpenter Bee", "He really likes wood", 20, 3, 5, 2),
        MonsterSpec::new(
            "Digger Bee",
            "You'll find him under stuff... maybe even you.",
            30,
            20,
            15,
            4,
        ),
        MonsterSpec::new(
            "LeafCutter Bee",
            "You better Leaf or he'll cut you.",
            100,
            45,
            50,
            8,
        ),
        MonsterSpec::new(
            "Bumble Bee",
            "This bee can get you some really hot potential suitors.",
            1000,
            666,
            250,
            16,
        ),
        MonsterSpec::new(
            "Honey Bee",
            "Sweeter than Maple, better than Canada.",
            3000,
            1000,
            500,
            32,
        ),
        MonsterSpec::new(
            "Yellow Jacket",
            "Don't get confused. Not only will he sting you, but his clothing is spectacular.",
            10000,
            2000,
            1500,
            64,
        ),
        MonsterSpec::new(
            "Killer Bee",
            "He's always confused why everyone is scared of him. He's only killed 1000 people",
            25000,
            11000,
            5000,
            128,
        ),
        MonsterSpec::new(
            "Queen Bee",
            "Queen of queens. Bee of bees. Bow down before your master!",
            100000,
            10000,
            10000,
            500,
        ),
    ]
}

/// Checks that a catalog has one entry per tier and unique, non-empty names.
pub fn validate_catalog(catalog: &[MonsterSpec]) -> HiveResult<()> {
    if catalog.len() != config::MONSTER_TIERS {
        return Err(HiveError::InvalidCatalog(format!(
            "expected {} monsters, found {}",
            config::MONSTER_TIERS,
            catalog.len()
        )));
    }

    let mut seen = HashSet::new();
    for spec in catalog {
        if spec.name.trim().is_empty() {
            return Err(HiveError::InvalidCatalog(
                "monster names must not be empty".to_string(),
            ));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(HiveError::InvalidCatalog(format!(
                "duplicate monster name '{}'",
                spec.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = bee_catalog();
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_default_catalog_grows_in_power() {
        let catalog = bee_catalog();
        for pair in catalog.windows(2) {
            assert!(pair[0].xp_gained <= pair[1].xp_gained);
        }
    }

    #[test]
    fn test_short_catalog_is_rejected() {
        let mut catalog = bee_catalog();
        catalog.pop();
        assert!(matches!(
            validate_catalog(&catalog),
            Err(HiveError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut catalog = bee_catalog();
        catalog[8].name = "Honey Bee".to_string();
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("Honey Bee"));
    }

    #[test]
    fn test_load_catalog_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&bee_catalog()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = MonsterSpec::load_catalog(file.path()).unwrap();
        assert_eq!(loaded, bee_catalog());
    }

    #[test]
    fn test_load_catalog_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(matches!(
            MonsterSpec::load_catalog(file.path()),
            Err(HiveError::Serde(_))
        ));
    }
}
