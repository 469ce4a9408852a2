//! # Encounter Generation
//!
//! Weighted monster placement. Every room gets one monster, drawn by rolling
//! `1..=100` against a cumulative threshold table whose bands map to catalog
//! tiers in ascending power order.

use crate::{config, validate_catalog, HiveError, HiveResult, MonsterId, MonsterSpec, WorldStore};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest roll of each band in the standard table, tier 1 first.
pub const STANDARD_THRESHOLDS: [u32; config::MONSTER_TIERS] = [0, 12, 24, 35, 48, 66, 80, 89, 94, 98];

/// Highest possible encounter roll.
pub const MAX_ROLL: u32 = 100;

/// Monster tier, 1 (weakest, most common) through 10 (rarest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tier(u8);

impl Tier {
    /// Creates a tier from its 1-based number.
    pub fn new(number: u8) -> Option<Tier> {
        (1..=config::MONSTER_TIERS as u8)
            .contains(&number)
            .then_some(Tier(number))
    }

    /// 1-based tier number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// 0-based position in the catalog and roster.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// All tiers, weakest first.
    pub fn all() -> impl Iterator<Item = Tier> {
        (1..=config::MONSTER_TIERS as u8).map(Tier)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier{}", self.0)
    }
}

/// Cumulative threshold table mapping a roll to a tier.
///
/// Band `i` covers `[thresholds[i], thresholds[i + 1])`; the last band runs
/// through [`MAX_ROLL`] inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterTable {
    thresholds: [u32; config::MONSTER_TIERS],
}

impl EncounterTable {
    /// Builds a table from band lower bounds.
    ///
    /// The first bound must be 0 and the bounds must strictly increase up to
    /// at most [`MAX_ROLL`], so every roll lands in exactly one band.
    pub fn new(thresholds: [u32; config::MONSTER_TIERS]) -> HiveResult<Self> {
        if thresholds[0] != 0 {
            return Err(HiveError::InvalidConfig(
                "the first encounter band must start at 0".to_string(),
            ));
        }
        if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(HiveError::InvalidConfig(
                "encounter thresholds must strictly increase".to_string(),
            ));
        }
        if thresholds[config::MONSTER_TIERS - 1] > MAX_ROLL {
            return Err(HiveError::InvalidConfig(format!(
                "encounter thresholds must not exceed {}",
                MAX_ROLL
            )));
        }
        Ok(Self { thresholds })
    }

    /// The standard hive table.
    pub fn standard() -> Self {
        Self {
            thresholds: STANDARD_THRESHOLDS,
        }
    }

    /// Maps a roll in `1..=100` to its tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use hivegen::{EncounterTable, Tier};
    ///
    /// let table = EncounterTable::standard();
    /// assert_eq!(table.tier_for_roll(1), Tier::new(1).unwrap());
    /// assert_eq!(table.tier_for_roll(48), Tier::new(5).unwrap());
    /// assert_eq!(table.tier_for_roll(100), Tier::new(10).unwrap());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `roll` is outside `1..=100`.
    pub fn tier_for_roll(&self, roll: u32) -> Tier {
        assert!(
            (1..=MAX_ROLL).contains(&roll),
            "encounter roll {} outside 1..={}",
            roll,
            MAX_ROLL
        );
        let band = self
            .thresholds
            .iter()
            .rposition(|&lower| lower <= roll)
            .unwrap_or(0);
        Tier(band as u8 + 1)
    }

    /// Draws a roll uniformly from `1..=100`.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> u32 {
        rng.gen_range(1..=MAX_ROLL)
    }
}

impl Default for EncounterTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Saved monster ids indexed by tier, resolved once when the catalog is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterRoster {
    monsters: [MonsterId; config::MONSTER_TIERS],
}

impl MonsterRoster {
    pub fn new(monsters: [MonsterId; config::MONSTER_TIERS]) -> Self {
        Self { monsters }
    }

    pub fn get(&self, tier: Tier) -> MonsterId {
        self.monsters[tier.index()]
    }
}

/// Saves every catalog entry and resolves the roster by name.
///
/// A name that cannot be found after saving means the store and catalog
/// disagree, and aborts the run.
pub fn seed_catalog<S>(store: &mut S, catalog: &[MonsterSpec]) -> HiveResult<MonsterRoster>
where
    S: WorldStore + ?Sized,
{
    validate_catalog(catalog)?;

    for spec in catalog {
        store.save_monster(spec)?;
    }

    let resolved = catalog
        .iter()
        .map(|spec| store.get_monster_by_name(&spec.name))
        .collect::<HiveResult<Vec<MonsterId>>>()?;
    let monsters: [MonsterId; config::MONSTER_TIERS] = resolved.try_into().map_err(|_| {
        HiveError::InvalidCatalog(format!("expected {} monsters", config::MONSTER_TIERS))
    })?;

    debug!("Seeded {} monsters", catalog.len());
    Ok(MonsterRoster::new(monsters))
}

/// Per-tier counts from one encounter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub per_tier: [usize; config::MONSTER_TIERS],
}

impl EncounterSummary {
    pub fn count(&self, tier: Tier) -> usize {
        self.per_tier[tier.index()]
    }

    pub fn total(&self) -> usize {
        self.per_tier.iter().sum()
    }
}

/// Assigns a freshly rolled monster to every room in the store.
///
/// Previous assignments are overwritten.
pub fn assign_encounters<S, R>(
    store: &mut S,
    roster: &MonsterRoster,
    table: &EncounterTable,
    rng: &mut R,
) -> HiveResult<EncounterSummary>
where
    S: WorldStore + ?Sized,
    R: Rng + ?Sized,
{
    let mut summary = EncounterSummary::default();

    for room in store.list_rooms()? {
        let tier = table.tier_for_roll(EncounterTable::roll(rng));
        store.set_room_monster(room, roster.get(tier))?;
        summary.per_tier[tier.index()] += 1;
    }

    debug!("Assigned {} encounters: {:?}", summary.total(), summary.per_tier);
    Ok(summary)
}
