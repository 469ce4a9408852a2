//! # Hivegen
//!
//! Procedural generation of a connected, bee-themed dungeon world.
//!
//! ## Architecture Overview
//!
//! Generation is a strict four-stage batch pipeline:
//!
//! - **Carving**: a random walker turns a square wall grid into a tunnel network
//! - **Materialization**: every carved cell becomes exactly one persisted room
//! - **Linking**: each room gets a directed, compass-tagged link to every carved neighbour
//! - **Encounters**: every room is assigned a monster from a weighted tier table
//!
//! Rooms, links and monsters live behind the [`WorldStore`] persistence contract.
//! Room titles and descriptions come from a [`ContentGenerator`]. Both are
//! collaborators supplied by the caller; [`MemoryStore`] and [`HiveContent`]
//! are the bundled implementations.

pub mod generation;
pub mod world;

pub use generation::*;
pub use world::*;

/// Core error type for the Hivegen world generator.
#[derive(thiserror::Error, Debug)]
pub enum HiveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Monster catalog is malformed
    #[error("Invalid monster catalog: {0}")]
    InvalidCatalog(String),

    /// No monster with this name has been saved
    #[error("Monster not found: {0}")]
    MonsterNotFound(String),

    /// No room with this id exists in the store
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    /// The persistence layer rejected an operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generation produced an unusable world
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Hivegen codebase.
pub type HiveResult<T> = Result<T, HiveError>;

/// Version information for the generator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation configuration constants.
pub mod config {
    /// Default grid side length in cells
    pub const DEFAULT_DIMENSIONS: usize = 50;

    /// Default number of tunnels the walker carves
    pub const DEFAULT_MAX_TUNNELS: u32 = 500;

    /// Default upper bound on a single tunnel's length
    pub const DEFAULT_MAX_LENGTH: u32 = 8;

    /// Default random seed
    pub const DEFAULT_SEED: u64 = 42;

    /// Number of monster tiers in the encounter table
    pub const MONSTER_TIERS: usize = 10;
}
