//! # World Module
//!
//! Shared vocabulary of the generated world: compass directions, room and
//! monster identities, the monster catalog and the persistence contract.

pub mod catalog;
pub mod store;

pub use catalog::*;
pub use store::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Compass directions for carving and room links.
///
/// The declaration order is the neighbour slot order used by the linker:
/// `0 = North, 1 = East, 2 = South, 3 = West`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions in neighbour slot order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the neighbour slot index of this direction.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Converts a neighbour slot index back into a direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use hivegen::Direction;
    ///
    /// assert_eq!(Direction::from_index(1), Some(Direction::East));
    /// assert_eq!(Direction::from_index(4), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Direction> {
        Direction::ALL.get(index).copied()
    }

    /// Walker heading as a `(Δrow, Δcol)` pair.
    ///
    /// North and South move along the column axis, East and West along the
    /// row axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use hivegen::Direction;
    ///
    /// assert_eq!(Direction::North.heading(), (0, -1));
    /// assert_eq!(Direction::East.heading(), (1, 0));
    /// ```
    pub fn heading(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Grid offset `(Δrow, Δcol)` of the neighbour a link tagged with this
    /// direction points at. Rows grow southward, columns grow eastward.
    pub fn neighbor_offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Returns the direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// True when `other` is neither this direction nor its opposite.
    pub fn is_perpendicular_to(self, other: Direction) -> bool {
        other != self && other != self.opposite()
    }

    /// Single-letter code used in logs and map dumps.
    pub fn code(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Unique identifier for persisted rooms.
pub type RoomId = Uuid;

/// Unique identifier for persisted monsters.
pub type MonsterId = Uuid;

/// Creates a new unique room ID.
pub fn new_room_id() -> RoomId {
    Uuid::new_v4()
}

/// Creates a new unique monster ID.
pub fn new_monster_id() -> MonsterId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_order_round_trips() {
        for (slot, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), slot);
            assert_eq!(Direction::from_index(slot), Some(*direction));
        }
    }

    #[test]
    fn test_heading_vectors() {
        assert_eq!(Direction::North.heading(), (0, -1));
        assert_eq!(Direction::East.heading(), (1, 0));
        assert_eq!(Direction::South.heading(), (0, 1));
        assert_eq!(Direction::West.heading(), (-1, 0));
    }

    #[test]
    fn test_opposites_cancel() {
        for direction in Direction::ALL {
            let (dr, dc) = direction.heading();
            let (or, oc) = direction.opposite().heading();
            assert_eq!((dr + or, dc + oc), (0, 0));

            let (nr, nc) = direction.neighbor_offset();
            let (onr, onc) = direction.opposite().neighbor_offset();
            assert_eq!((nr + onr, nc + onc), (0, 0));
        }
    }

    #[test]
    fn test_perpendicular() {
        assert!(Direction::North.is_perpendicular_to(Direction::East));
        assert!(Direction::North.is_perpendicular_to(Direction::West));
        assert!(!Direction::North.is_perpendicular_to(Direction::North));
        assert!(!Direction::North.is_perpendicular_to(Direction::South));
    }

    #[test]
    fn test_direction_serde_is_lowercase() {
        let json = serde_json::to_string(&Direction::West).unwrap();
        assert_eq!(json, "\"west\"");
        let back: Direction = serde_json::from_str("\"north\"").unwrap();
        assert_eq!(back, Direction::North);
    }

    #[test]
    fn test_id_uniqueness() {
        assert_ne!(new_room_id(), new_room_id());
        assert_ne!(new_monster_id(), new_monster_id());
    }
}
