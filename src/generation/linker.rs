//! # Room Materialization and Linking
//!
//! Turns a finished [`OccupancyGrid`] into a room graph in two passes:
//!
//! 1. **Materialize**: one persisted room per floor cell, in row-major order
//! 2. **Link**: for each room, one directed link per carved neighbour
//!
//! The walker may cross a cell many times, but the grid only records that it
//! is floor, so deferring room creation until carving is done guarantees a
//! single room per cell. Each adjacent pair ends up with two opposite links
//! because both cells are visited by the link pass.

use crate::{ContentGenerator, Direction, HiveError, HiveResult, OccupancyGrid, RoomId, WorldStore};
use log::debug;

/// Coordinate-to-room lookup table built by the materialize pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomIndex {
    dimensions: usize,
    rooms: Vec<Option<RoomId>>,
}

impl RoomIndex {
    /// Creates an empty index for a `dimensions × dimensions` grid.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            rooms: vec![None; dimensions * dimensions],
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Room materialized at `(row, col)`, or `None` for a wall or an
    /// out-of-range coordinate.
    pub fn get(&self, row: usize, col: usize) -> Option<RoomId> {
        if row < self.dimensions && col < self.dimensions {
            self.rooms[row * self.dimensions + col]
        } else {
            None
        }
    }

    /// Records the room for a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of range or already holds a room.
    pub fn insert(&mut self, row: usize, col: usize, room: RoomId) {
        assert!(
            row < self.dimensions && col < self.dimensions,
            "room index ({}, {}) out of bounds",
            row,
            col
        );
        let slot = &mut self.rooms[row * self.dimensions + col];
        assert!(slot.is_none(), "cell ({}, {}) already has a room", row, col);
        *slot = Some(room);
    }

    pub fn len(&self) -> usize {
        self.rooms.iter().filter(|room| room.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rooms with their `(row, col)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), RoomId)> + '_ {
        let size = self.dimensions;
        self.rooms
            .iter()
            .enumerate()
            .filter_map(move |(index, room)| room.map(|id| ((index / size, index % size), id)))
    }

    /// Carved neighbours of `(row, col)` in slot order `[N, E, S, W]`.
    ///
    /// A slot is empty when the neighbour lies outside the grid or is a wall.
    ///
    /// # Examples
    ///
    /// ```
    /// use hivegen::{new_room_id, Direction, RoomIndex};
    ///
    /// let mut index = RoomIndex::new(3);
    /// let center = new_room_id();
    /// let north = new_room_id();
    /// index.insert(1, 1, center);
    /// index.insert(0, 1, north);
    ///
    /// let slots = index.neighbors(1, 1);
    /// assert_eq!(slots[Direction::North.index()], Some(north));
    /// assert_eq!(slots[Direction::South.index()], None);
    /// ```
    pub fn neighbors(&self, row: usize, col: usize) -> [Option<RoomId>; 4] {
        Direction::ALL.map(|direction| {
            let (dr, dc) = direction.neighbor_offset();
            let row = row.checked_add_signed(dr)?;
            let col = col.checked_add_signed(dc)?;
            self.get(row, col)
        })
    }
}

/// Creates and persists one room per floor cell of `grid`.
pub fn materialize_rooms<S, C>(
    grid: &OccupancyGrid,
    store: &mut S,
    content: &mut C,
) -> HiveResult<RoomIndex>
where
    S: WorldStore + ?Sized,
    C: ContentGenerator + ?Sized,
{
    let mut index = RoomIndex::new(grid.dimensions());

    for (row, col) in grid.floor_cells() {
        let title = content.title();
        let description = content.description();
        let room = store.create_room(title, description, col, row)?;
        index.insert(row, col, room);
    }

    debug!("Materialized {} rooms", index.len());
    Ok(index)
}

/// Persists a directed link from every room to each of its carved neighbours.
///
/// Returns the number of links created.
pub fn link_rooms<S>(index: &RoomIndex, store: &mut S) -> HiveResult<usize>
where
    S: WorldStore + ?Sized,
{
    let mut created = 0;

    for ((row, col), room) in index.iter() {
        for (slot, neighbor) in index.neighbors(row, col).into_iter().enumerate() {
            let Some(neighbor) = neighbor else {
                continue;
            };
            let direction = Direction::from_index(slot).ok_or_else(|| {
                HiveError::GenerationFailed(format!("no direction for neighbour slot {}", slot))
            })?;
            store.create_link(room, neighbor, direction)?;
            created += 1;
        }
    }

    debug!("Created {} links", created);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, HiveContent, MemoryStore};

    fn grid_with(dimensions: usize, floor: &[(usize, usize)]) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(dimensions);
        for &(row, col) in floor {
            grid.set(row, col, Cell::Floor);
        }
        grid
    }

    #[test]
    fn test_materialize_one_room_per_floor_cell() {
        let grid = grid_with(4, &[(0, 0), (0, 1), (2, 3)]);
        let mut store = MemoryStore::new();
        let mut content = HiveContent::new(1);

        let index = materialize_rooms(&grid, &mut store, &mut content).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(store.room_count(), 3);
        // x is the column, y the row
        let room = store.room(index.get(2, 3).unwrap()).unwrap();
        assert_eq!((room.x, room.y), (3, 2));
        assert!(!room.title.is_empty());
        assert!(index.get(1, 1).is_none());
    }

    #[test]
    fn test_neighbors_at_corners_and_edges() {
        let grid = grid_with(3, &[(0, 0), (0, 1), (1, 0), (2, 2)]);
        let mut store = MemoryStore::new();
        let index = materialize_rooms(&grid, &mut store, &mut HiveContent::new(2)).unwrap();

        let corner = index.neighbors(0, 0);
        assert_eq!(corner[Direction::North.index()], None);
        assert_eq!(corner[Direction::East.index()], index.get(0, 1));
        assert_eq!(corner[Direction::South.index()], index.get(1, 0));
        assert_eq!(corner[Direction::West.index()], None);

        assert_eq!(index.neighbors(2, 2), [None, None, None, None]);
    }

    #[test]
    fn test_link_creates_opposite_pairs() {
        let grid = grid_with(3, &[(1, 1), (1, 2)]);
        let mut store = MemoryStore::new();
        let index = materialize_rooms(&grid, &mut store, &mut HiveContent::new(3)).unwrap();

        let created = link_rooms(&index, &mut store).unwrap();
        assert_eq!(created, 2);

        let west = index.get(1, 1).unwrap();
        let east = index.get(1, 2).unwrap();
        assert_eq!(store.room(west).unwrap().exit(Direction::East), Some(east));
        assert_eq!(store.room(east).unwrap().exit(Direction::West), Some(west));
    }

    #[test]
    fn test_link_full_block() {
        let cells: Vec<(usize, usize)> = (0..3).flat_map(|r| (0..3).map(move |c| (r, c))).collect();
        let grid = grid_with(3, &cells);
        let mut store = MemoryStore::new();
        let index = materialize_rooms(&grid, &mut store, &mut HiveContent::new(4)).unwrap();

        // 12 adjacent pairs in a 3x3 block, two links each
        assert_eq!(link_rooms(&index, &mut store).unwrap(), 24);
        assert_eq!(store.link_count(), 24);
        let center = store.room(index.get(1, 1).unwrap()).unwrap();
        assert_eq!(center.exits.len(), 4);
    }

    #[test]
    #[should_panic(expected = "already has a room")]
    fn test_double_insert_panics() {
        let mut index = RoomIndex::new(2);
        index.insert(0, 0, crate::new_room_id());
        index.insert(0, 0, crate::new_room_id());
    }
}
