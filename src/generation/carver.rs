//! # Tunnel Carving
//!
//! Random-walk carver that turns a wall grid into a connected tunnel network.
//!
//! The walker starts at the grid center and repeatedly:
//! 1. Picks a heading perpendicular to the previous one (any heading on the first tunnel)
//! 2. Draws a tunnel length from `1..=max_length`
//! 3. Steps that many cells, marking each one floor, stopping early at the grid edge
//!
//! Every tunnel, full-length or cut short, spends one unit of the tunnel budget.
//! Because the whole network is one continuous walk, every floor cell is
//! reachable from the start.

use crate::{
    utils, Cell, Direction, GenerationConfig, Generator, HiveResult, OccupancyGrid,
};
use log::{debug, trace};
use rand::Rng;

/// Random-walk tunnel carver.
#[derive(Debug, Clone, Copy, Default)]
pub struct TunnelCarver;

/// Everything the walker produced and did during one carving run.
#[derive(Debug, Clone)]
pub struct CarveReport {
    /// The carved grid
    pub grid: OccupancyGrid,
    /// Cell the walker started from
    pub start: (usize, usize),
    /// Cell the walker ended on
    pub cursor: (usize, usize),
    /// Heading chosen for each tunnel, in order
    pub headings: Vec<Direction>,
    /// Tunnels stopped early by the grid edge
    pub truncated_tunnels: u32,
    /// Total single-cell steps taken
    pub steps: usize,
}

impl CarveReport {
    /// Number of tunnels carved, including truncated ones.
    pub fn tunnels_carved(&self) -> usize {
        self.headings.len()
    }
}

/// Outcome of a single tunnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tunnel {
    steps: u32,
    truncated: bool,
}

/// Cursor state while carving.
#[derive(Debug)]
struct Walker {
    row: usize,
    col: usize,
    last_heading: Option<Direction>,
    tunnels_remaining: u32,
    max_length: u32,
}

impl Walker {
    fn new(grid: &mut OccupancyGrid, max_tunnels: u32, max_length: u32) -> Self {
        let (row, col) = grid.center();
        grid.set(row, col, Cell::Floor);
        Self {
            row,
            col,
            last_heading: None,
            tunnels_remaining: max_tunnels,
            max_length,
        }
    }

    /// Draws headings until one is perpendicular to the last tunnel.
    ///
    /// Two of the four headings are always acceptable, so each draw succeeds
    /// with probability one half.
    fn choose_heading<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        loop {
            let candidate = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            match self.last_heading {
                None => return candidate,
                Some(last) if last.is_perpendicular_to(candidate) => return candidate,
                Some(_) => continue,
            }
        }
    }

    fn dig<R: Rng + ?Sized>(
        &mut self,
        grid: &mut OccupancyGrid,
        heading: Direction,
        rng: &mut R,
    ) -> Tunnel {
        let length = rng.gen_range(1..=self.max_length);
        let mut tunnel = Tunnel {
            steps: 0,
            truncated: false,
        };

        while tunnel.steps < length {
            match grid.offset(self.row, self.col, heading.heading()) {
                Some((row, col)) => {
                    self.row = row;
                    self.col = col;
                    grid.set(row, col, Cell::Floor);
                    tunnel.steps += 1;
                }
                None => {
                    tunnel.truncated = true;
                    break;
                }
            }
        }

        self.last_heading = Some(heading);
        self.tunnels_remaining -= 1;
        tunnel
    }
}

impl TunnelCarver {
    pub fn new() -> Self {
        Self
    }

    /// Carves a fresh grid according to `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hivegen::{GenerationConfig, TunnelCarver};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = GenerationConfig::new(1).with_max_tunnels(0);
    /// let mut rng = StdRng::seed_from_u64(config.seed);
    /// let report = TunnelCarver::new().carve(&config, &mut rng);
    /// assert_eq!(report.grid.floor_count(), 1);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `config` would fail [`GenerationConfig::validate`].
    pub fn carve<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> CarveReport {
        assert!(
            config.dimensions > 0 && config.max_length > 0,
            "carving needs a non-empty grid and a positive max_length"
        );
        let mut grid = OccupancyGrid::new(config.dimensions);
        let mut walker = Walker::new(&mut grid, config.max_tunnels, config.max_length);
        let start = (walker.row, walker.col);

        let mut headings = Vec::new();
        let mut truncated_tunnels = 0;
        let mut steps = 0;

        while walker.tunnels_remaining > 0 {
            let heading = walker.choose_heading(rng);
            let tunnel = walker.dig(&mut grid, heading, rng);
            trace!(
                "tunnel {} heading {} ran {} steps{}",
                headings.len(),
                heading.code(),
                tunnel.steps,
                if tunnel.truncated { " (hit edge)" } else { "" }
            );

            headings.push(heading);
            steps += tunnel.steps as usize;
            if tunnel.truncated {
                truncated_tunnels += 1;
            }
        }

        debug!(
            "Carved {} tunnels ({} truncated), {} steps, {} floor cells",
            headings.len(),
            truncated_tunnels,
            steps,
            grid.floor_count()
        );

        CarveReport {
            start,
            cursor: (walker.row, walker.col),
            grid,
            headings,
            truncated_tunnels,
            steps,
        }
    }
}

impl Generator<CarveReport> for TunnelCarver {
    fn generate<R: Rng + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> HiveResult<CarveReport> {
        config.validate()?;
        let report = self.carve(config, rng);
        self.validate(&report, config)?;
        Ok(report)
    }

    fn validate(&self, report: &CarveReport, _config: &GenerationConfig) -> HiveResult<()> {
        utils::validate_grid(&report.grid, report.start)
    }

    fn generator_type(&self) -> &'static str {
        "TunnelCarver"
    }
}
