//! # World Generation Pipeline
//!
//! One-shot batch run that wipes the store and rebuilds the hive:
//! delete rooms, delete monsters, seed the catalog, carve, materialize,
//! link, assign encounters. Any failure aborts the run; a failed run is
//! simply re-run from scratch.

use crate::{
    assign_encounters, bee_catalog, link_rooms, materialize_rooms, seed_catalog, utils,
    ContentGenerator, EncounterSummary, EncounterTable, GenerationConfig, Generator, HiveResult,
    MonsterSpec, OccupancyGrid, TunnelCarver, WorldStore,
};
use log::{info, warn};
use rand::Rng;

/// Drives a complete generation run against a store.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    config: GenerationConfig,
    carver: TunnelCarver,
    table: EncounterTable,
    catalog: Vec<MonsterSpec>,
}

/// What a generation run produced.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    /// The carved grid
    pub grid: OccupancyGrid,
    /// Number of floor cells carved
    pub floor_cells: usize,
    /// Number of rooms persisted
    pub rooms: usize,
    /// Number of directed links persisted
    pub links: usize,
    /// Tunnels the walker carved, including edge-truncated ones
    pub tunnels_carved: usize,
    /// Tunnels cut short by the grid edge
    pub truncated_tunnels: u32,
    /// Monsters placed per tier
    pub encounters: EncounterSummary,
}

impl WorldGenerator {
    /// Creates a generator with the default bee catalog and encounter table.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            carver: TunnelCarver::new(),
            table: EncounterTable::standard(),
            catalog: bee_catalog(),
        }
    }

    /// Replaces the monster catalog seeded at the start of each run.
    pub fn with_catalog(mut self, catalog: Vec<MonsterSpec>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replaces the encounter threshold table.
    pub fn with_table(mut self, table: EncounterTable) -> Self {
        self.table = table;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Runs the pipeline with a generator seeded from the configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use hivegen::{GenerationConfig, HiveContent, MemoryStore, WorldGenerator};
    ///
    /// let generator = WorldGenerator::new(GenerationConfig::for_testing(5));
    /// let mut store = MemoryStore::new();
    /// let summary = generator.generate(&mut store, &mut HiveContent::new(5)).unwrap();
    /// assert_eq!(summary.rooms, store.room_count());
    /// assert_eq!(summary.encounters.total(), summary.rooms);
    /// ```
    pub fn generate<S, C>(&self, store: &mut S, content: &mut C) -> HiveResult<WorldSummary>
    where
        S: WorldStore + ?Sized,
        C: ContentGenerator + ?Sized,
    {
        let mut rng = utils::create_rng(&self.config);
        self.generate_with_rng(store, content, &mut rng)
    }

    /// Runs the pipeline drawing all carving and encounter randomness from `rng`.
    pub fn generate_with_rng<S, C, R>(
        &self,
        store: &mut S,
        content: &mut C,
        rng: &mut R,
    ) -> HiveResult<WorldSummary>
    where
        S: WorldStore + ?Sized,
        C: ContentGenerator + ?Sized,
        R: Rng + ?Sized,
    {
        self.config.validate()?;

        info!("Deleting all rooms");
        store.delete_all_rooms()?;
        info!("Deleting all monsters");
        store.delete_all_monsters()?;

        info!("Creating monsters");
        let roster = seed_catalog(store, &self.catalog)?;

        info!(
            "Carving a {}x{} grid ({} tunnels, max length {})",
            self.config.dimensions,
            self.config.dimensions,
            self.config.max_tunnels,
            self.config.max_length
        );
        let report = self.carver.generate(&self.config, rng)?;
        let floor_cells = report.grid.floor_count();
        if floor_cells == 1 {
            warn!("Carving produced only the starting cell");
        }

        info!("Linking rooms");
        let index = materialize_rooms(&report.grid, store, content)?;
        let links = link_rooms(&index, store)?;

        info!("Filling rooms with monsters");
        let encounters = assign_encounters(store, &roster, &self.table, rng)?;

        info!(
            "Generated {} rooms with {} links from {} tunnels",
            index.len(),
            links,
            report.tunnels_carved()
        );

        Ok(WorldSummary {
            floor_cells,
            rooms: index.len(),
            links,
            tunnels_carved: report.tunnels_carved(),
            truncated_tunnels: report.truncated_tunnels,
            encounters,
            grid: report.grid,
        })
    }
}

impl Default for WorldGenerator {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}
