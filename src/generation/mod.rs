//! # Generation Module
//!
//! Procedural generation of the hive: tunnel carving, room materialization
//! and linking, and encounter placement.
//!
//! The stages run strictly in order. Carving owns the [`OccupancyGrid`]
//! exclusively; rooms are only created once carving is finished, links only
//! once every room exists, and encounters only once the room graph is complete.

pub mod carver;
pub mod content;
pub mod encounters;
pub mod grid;
pub mod linker;
pub mod pipeline;

pub use carver::*;
pub use content::*;
pub use encounters::*;
pub use grid::*;
pub use linker::*;
pub use pipeline::*;

use crate::{config, HiveError, HiveResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a generation run.
///
/// Controls the size of the grid and how much the walker is allowed to carve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Side length of the square grid
    pub dimensions: usize,
    /// Number of tunnels the walker carves before stopping
    pub max_tunnels: u32,
    /// Upper bound on the length of a single tunnel
    pub max_length: u32,
}

impl GenerationConfig {
    /// Creates a configuration with the default grid and tunnel limits.
    ///
    /// # Examples
    ///
    /// ```
    /// use hivegen::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.dimensions, 50);
    /// assert_eq!(config.max_tunnels, 500);
    /// assert_eq!(config.max_length, 8);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            dimensions: config::DEFAULT_DIMENSIONS,
            max_tunnels: config::DEFAULT_MAX_TUNNELS,
            max_length: config::DEFAULT_MAX_LENGTH,
        }
    }

    /// Creates a configuration for testing with a small grid.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            dimensions: 12,
            max_tunnels: 30,
            max_length: 4,
        }
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_max_tunnels(mut self, max_tunnels: u32) -> Self {
        self.max_tunnels = max_tunnels;
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> HiveResult<Self> {
        let raw = fs::read_to_string(path)?;
        let config: GenerationConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects parameters the walker cannot run with.
    pub fn validate(&self) -> HiveResult<()> {
        if self.dimensions == 0 {
            return Err(HiveError::InvalidConfig(
                "dimensions must be at least 1".to_string(),
            ));
        }
        if self.dimensions.checked_mul(self.dimensions).is_none() {
            return Err(HiveError::InvalidConfig(format!(
                "a {0}x{0} grid is too large to allocate",
                self.dimensions
            )));
        }
        if self.max_length == 0 {
            return Err(HiveError::InvalidConfig(
                "max_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(config::DEFAULT_SEED)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> HiveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> HiveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Counts the floor cells reachable from `start` through floor cells.
    pub fn reachable_floor_count(grid: &OccupancyGrid, start: (usize, usize)) -> usize {
        let (row, col) = start;
        if !grid.is_floor(row, col) {
            return 0;
        }

        let size = grid.dimensions();
        let mut visited = vec![false; size * size];
        let mut queue = VecDeque::new();
        visited[row * size + col] = true;
        queue.push_back(start);
        let mut reached = 0;

        while let Some((row, col)) = queue.pop_front() {
            reached += 1;
            for direction in crate::Direction::ALL {
                if let Some((nr, nc)) = grid.offset(row, col, direction.neighbor_offset()) {
                    if grid.is_floor(nr, nc) && !visited[nr * size + nc] {
                        visited[nr * size + nc] = true;
                        queue.push_back((nr, nc));
                    }
                }
            }
        }

        reached
    }

    /// Validates that a carved grid has floor and that all of it is connected.
    pub fn validate_grid(grid: &OccupancyGrid, start: (usize, usize)) -> HiveResult<()> {
        let floor_count = grid.floor_count();
        if floor_count == 0 {
            return Err(HiveError::GenerationFailed(
                "grid has no floor cells".to_string(),
            ));
        }

        let reached = reachable_floor_count(grid, start);
        if reached != floor_count {
            return Err(HiveError::GenerationFailed(format!(
                "only {} of {} floor cells are reachable from the start",
                reached, floor_count
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.dimensions, config::DEFAULT_DIMENSIONS);
        assert_eq!(config.max_tunnels, config::DEFAULT_MAX_TUNNELS);
        assert_eq!(config.max_length, config::DEFAULT_MAX_LENGTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let zero_grid = GenerationConfig::new(1).with_dimensions(0);
        assert!(matches!(
            zero_grid.validate(),
            Err(HiveError::InvalidConfig(_))
        ));

        let huge_grid = GenerationConfig::new(1).with_dimensions(usize::MAX);
        assert!(matches!(
            huge_grid.validate(),
            Err(HiveError::InvalidConfig(_))
        ));

        let zero_length = GenerationConfig::new(1).with_max_length(0);
        assert!(zero_length.validate().is_err());

        // No tunnels at all is a legal, if dull, world
        let no_tunnels = GenerationConfig::new(1).with_max_tunnels(0);
        assert!(no_tunnels.validate().is_ok());
    }

    #[test]
    fn test_config_from_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "seed": 9, "dimensions": 20 }"#).unwrap();

        let config = GenerationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.dimensions, 20);
        assert_eq!(config.max_tunnels, config::DEFAULT_MAX_TUNNELS);
    }

    #[test]
    fn test_config_from_invalid_json_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "max_length": 0 }"#).unwrap();

        assert!(matches!(
            GenerationConfig::from_json_file(file.path()),
            Err(HiveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_utils_rng_is_reproducible() {
        use rand::Rng;

        let config = GenerationConfig::new(12345);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_validate_grid_detects_islands() {
        let mut grid = OccupancyGrid::new(5);
        grid.set(2, 2, Cell::Floor);
        grid.set(2, 3, Cell::Floor);
        assert!(utils::validate_grid(&grid, (2, 2)).is_ok());

        grid.set(0, 0, Cell::Floor);
        assert_eq!(utils::reachable_floor_count(&grid, (2, 2)), 2);
        assert!(matches!(
            utils::validate_grid(&grid, (2, 2)),
            Err(HiveError::GenerationFailed(_))
        ));
    }

    #[test]
    fn test_validate_grid_rejects_empty() {
        let grid = OccupancyGrid::new(4);
        assert!(utils::validate_grid(&grid, (2, 2)).is_err());
    }
}
