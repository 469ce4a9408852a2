//! # World Store
//!
//! The persistence contract the generator writes through, and an in-memory
//! implementation with JSON snapshot save/load.
//!
//! The generator never reads rooms back except through [`WorldStore::list_rooms`],
//! so any backend that honours these eight operations can hold a world.

use crate::{
    new_monster_id, new_room_id, Direction, HiveError, HiveResult, MonsterId, MonsterSpec, RoomId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Persistence operations consumed by the world generator.
///
/// Every call is synchronous and fail-fast: an `Err` aborts the run.
pub trait WorldStore {
    /// Persists a new room at grid coordinates `(x, y)`.
    fn create_room(
        &mut self,
        title: String,
        description: String,
        x: usize,
        y: usize,
    ) -> HiveResult<RoomId>;

    /// Persists a directed link from `from` to `to`, tagged with the direction traveled.
    fn create_link(&mut self, from: RoomId, to: RoomId, direction: Direction) -> HiveResult<()>;

    /// Lists every persisted room.
    fn list_rooms(&self) -> HiveResult<Vec<RoomId>>;

    /// Removes every room together with its links and encounter.
    fn delete_all_rooms(&mut self) -> HiveResult<()>;

    /// Removes every monster and clears room encounters that referenced them.
    fn delete_all_monsters(&mut self) -> HiveResult<()>;

    /// Persists a monster definition.
    fn save_monster(&mut self, spec: &MonsterSpec) -> HiveResult<MonsterId>;

    /// Looks a saved monster up by its unique name.
    fn get_monster_by_name(&self, name: &str) -> HiveResult<MonsterId>;

    /// Assigns a monster to a room, replacing any previous assignment.
    fn set_room_monster(&mut self, room: RoomId, monster: MonsterId) -> HiveResult<()>;
}

/// A persisted room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    /// Unique identifier for this room
    pub id: RoomId,
    pub title: String,
    pub description: String,
    /// Grid column of the cell that produced this room
    pub x: usize,
    /// Grid row of the cell that produced this room
    pub y: usize,
    /// Outgoing links keyed by the direction traveled
    pub exits: BTreeMap<Direction, RoomId>,
    /// Monster encountered in this room, if assigned
    pub monster: Option<MonsterId>,
}

impl RoomRecord {
    /// Returns the room reached by leaving in `direction`.
    pub fn exit(&self, direction: Direction) -> Option<RoomId> {
        self.exits.get(&direction).copied()
    }

    /// Iterates outgoing links as [`Link`] values.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.exits.iter().map(move |(&direction, &to)| Link {
            from: self.id,
            to,
            direction,
        })
    }
}

/// A directed room-to-room edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: RoomId,
    pub to: RoomId,
    pub direction: Direction,
}

/// A persisted monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: MonsterId,
    #[serde(flatten)]
    pub spec: MonsterSpec,
}

/// In-memory [`WorldStore`] that can be written to and read from a JSON snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    rooms: BTreeMap<RoomId, RoomRecord>,
    monsters: BTreeMap<MonsterId, MonsterRecord>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a room by id.
    pub fn room(&self, id: RoomId) -> Option<&RoomRecord> {
        self.rooms.get(&id)
    }

    /// Finds the room materialized from grid cell `(x, y)`.
    pub fn room_at(&self, x: usize, y: usize) -> Option<&RoomRecord> {
        self.rooms.values().find(|room| room.x == x && room.y == y)
    }

    /// Iterates every room in id order.
    pub fn rooms(&self) -> impl Iterator<Item = &RoomRecord> {
        self.rooms.values()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Iterates every directed link in the store.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.rooms.values().flat_map(|room| room.links())
    }

    /// Iterates the outgoing links of one room. Unknown rooms have none.
    pub fn links_from(&self, room: RoomId) -> impl Iterator<Item = Link> + '_ {
        self.rooms.get(&room).into_iter().flat_map(|record| record.links())
    }

    pub fn link_count(&self) -> usize {
        self.rooms.values().map(|room| room.exits.len()).sum()
    }

    /// Gets a monster by id.
    pub fn monster(&self, id: MonsterId) -> Option<&MonsterRecord> {
        self.monsters.get(&id)
    }

    pub fn monster_count(&self) -> usize {
        self.monsters.len()
    }

    /// Writes the whole store as pretty-printed JSON.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> HiveResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reads a store previously written by [`MemoryStore::save_to_path`].
    pub fn load_from_path(path: impl AsRef<Path>) -> HiveResult<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl WorldStore for MemoryStore {
    fn create_room(
        &mut self,
        title: String,
        description: String,
        x: usize,
        y: usize,
    ) -> HiveResult<RoomId> {
        let id = new_room_id();
        self.rooms.insert(
            id,
            RoomRecord {
                id,
                title,
                description,
                x,
                y,
                exits: BTreeMap::new(),
                monster: None,
            },
        );
        Ok(id)
    }

    fn create_link(&mut self, from: RoomId, to: RoomId, direction: Direction) -> HiveResult<()> {
        if !self.rooms.contains_key(&to) {
            return Err(HiveError::RoomNotFound(to));
        }
        let room = self.rooms.get_mut(&from).ok_or(HiveError::RoomNotFound(from))?;

        match room.exits.get(&direction) {
            Some(existing) if *existing != to => Err(HiveError::Storage(format!(
                "room {} already has a {} exit to {}",
                from, direction, existing
            ))),
            _ => {
                room.exits.insert(direction, to);
                Ok(())
            }
        }
    }

    fn list_rooms(&self) -> HiveResult<Vec<RoomId>> {
        let mut rooms: Vec<&RoomRecord> = self.rooms.values().collect();
        rooms.sort_by_key(|room| (room.y, room.x));
        Ok(rooms.into_iter().map(|room| room.id).collect())
    }

    fn delete_all_rooms(&mut self) -> HiveResult<()> {
        self.rooms.clear();
        Ok(())
    }

    fn delete_all_monsters(&mut self) -> HiveResult<()> {
        self.monsters.clear();
        for room in self.rooms.values_mut() {
            room.monster = None;
        }
        Ok(())
    }

    fn save_monster(&mut self, spec: &MonsterSpec) -> HiveResult<MonsterId> {
        if self.monsters.values().any(|m| m.spec.name == spec.name) {
            return Err(HiveError::Storage(format!(
                "monster '{}' already exists",
                spec.name
            )));
        }

        let id = new_monster_id();
        self.monsters.insert(
            id,
            MonsterRecord {
                id,
                spec: spec.clone(),
            },
        );
        Ok(id)
    }

    fn get_monster_by_name(&self, name: &str) -> HiveResult<MonsterId> {
        self.monsters
            .values()
            .find(|m| m.spec.name == name)
            .map(|m| m.id)
            .ok_or_else(|| HiveError::MonsterNotFound(name.to_string()))
    }

    fn set_room_monster(&mut self, room: RoomId, monster: MonsterId) -> HiveResult<()> {
        if !self.monsters.contains_key(&monster) {
            return Err(HiveError::MonsterNotFound(monster.to_string()));
        }
        let record = self.rooms.get_mut(&room).ok_or(HiveError::RoomNotFound(room))?;
        record.monster = Some(monster);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bee_catalog;

    fn two_rooms(store: &mut MemoryStore) -> (RoomId, RoomId) {
        let a = store
            .create_room("Comb".to_string(), "Waxy".to_string(), 1, 1)
            .unwrap();
        let b = store
            .create_room("Cell".to_string(), "Sticky".to_string(), 2, 1)
            .unwrap();
        (a, b)
    }

    #[test]
    fn test_create_room_and_link() {
        let mut store = MemoryStore::new();
        let (a, b) = two_rooms(&mut store);

        store.create_link(a, b, Direction::East).unwrap();
        store.create_link(b, a, Direction::West).unwrap();

        assert_eq!(store.room(a).unwrap().exit(Direction::East), Some(b));
        assert_eq!(store.room(b).unwrap().exit(Direction::West), Some(a));
        assert_eq!(store.link_count(), 2);
        assert_eq!(store.room_at(2, 1).unwrap().id, b);
    }

    #[test]
    fn test_links_from_one_room() {
        let mut store = MemoryStore::new();
        let (a, b) = two_rooms(&mut store);
        let c = store
            .create_room("Nook".to_string(), "Dim".to_string(), 1, 2)
            .unwrap();

        store.create_link(a, b, Direction::East).unwrap();
        store.create_link(a, c, Direction::South).unwrap();
        store.create_link(b, a, Direction::West).unwrap();

        let from_a: Vec<Link> = store.links_from(a).collect();
        assert_eq!(from_a.len(), 2);
        assert!(from_a.iter().all(|link| link.from == a));
        assert!(from_a.contains(&Link { from: a, to: b, direction: Direction::East }));
        assert!(from_a.contains(&Link { from: a, to: c, direction: Direction::South }));

        assert_eq!(store.links_from(b).count(), 1);
        assert_eq!(store.links_from(c).count(), 0);
        assert_eq!(store.links_from(new_room_id()).count(), 0);
    }

    #[test]
    fn test_link_to_missing_room_fails() {
        let mut store = MemoryStore::new();
        let (a, _) = two_rooms(&mut store);
        let ghost = new_room_id();

        assert!(matches!(
            store.create_link(a, ghost, Direction::North),
            Err(HiveError::RoomNotFound(id)) if id == ghost
        ));
        assert!(matches!(
            store.create_link(ghost, a, Direction::North),
            Err(HiveError::RoomNotFound(id)) if id == ghost
        ));
    }

    #[test]
    fn test_conflicting_exit_is_rejected() {
        let mut store = MemoryStore::new();
        let (a, b) = two_rooms(&mut store);
        let c = store
            .create_room("Nook".to_string(), "Dim".to_string(), 3, 3)
            .unwrap();

        store.create_link(a, b, Direction::East).unwrap();
        // Re-linking the same target is harmless
        store.create_link(a, b, Direction::East).unwrap();
        assert!(matches!(
            store.create_link(a, c, Direction::East),
            Err(HiveError::Storage(_))
        ));
    }

    #[test]
    fn test_list_rooms_is_row_major() {
        let mut store = MemoryStore::new();
        let late = store.create_room("a".into(), "a".into(), 0, 5).unwrap();
        let early = store.create_room("b".into(), "b".into(), 4, 0).unwrap();
        let middle = store.create_room("c".into(), "c".into(), 1, 5).unwrap();

        assert_eq!(store.list_rooms().unwrap(), vec![early, late, middle]);
    }

    #[test]
    fn test_monster_lookup_and_assignment() {
        let mut store = MemoryStore::new();
        let (a, _) = two_rooms(&mut store);
        let catalog = bee_catalog();

        let queen = store.save_monster(&catalog[9]).unwrap();
        assert_eq!(store.get_monster_by_name("Queen Bee").unwrap(), queen);
        assert!(matches!(
            store.get_monster_by_name("Wasp"),
            Err(HiveError::MonsterNotFound(_))
        ));

        store.set_room_monster(a, queen).unwrap();
        assert_eq!(store.room(a).unwrap().monster, Some(queen));
    }

    #[test]
    fn test_duplicate_monster_is_rejected() {
        let mut store = MemoryStore::new();
        let catalog = bee_catalog();
        store.save_monster(&catalog[0]).unwrap();
        assert!(matches!(
            store.save_monster(&catalog[0]),
            Err(HiveError::Storage(_))
        ));
    }

    #[test]
    fn test_delete_all_monsters_clears_encounters() {
        let mut store = MemoryStore::new();
        let (a, _) = two_rooms(&mut store);
        let bee = store.save_monster(&bee_catalog()[1]).unwrap();
        store.set_room_monster(a, bee).unwrap();

        store.delete_all_monsters().unwrap();

        assert_eq!(store.monster_count(), 0);
        assert_eq!(store.room(a).unwrap().monster, None);
        assert!(matches!(
            store.set_room_monster(a, bee),
            Err(HiveError::MonsterNotFound(_))
        ));
    }

    #[test]
    fn test_delete_all_rooms() {
        let mut store = MemoryStore::new();
        let (a, b) = two_rooms(&mut store);
        store.create_link(a, b, Direction::East).unwrap();

        store.delete_all_rooms().unwrap();

        assert_eq!(store.room_count(), 0);
        assert_eq!(store.link_count(), 0);
        assert!(store.list_rooms().unwrap().is_empty());
    }
}
