use std::collections::BTreeMap;

use crate::object::{ObjectCategory, RoomObject};
use crate::position::{Position, RoomName};
use crate::room::{LookItem, RoomSnapshot};
use crate::terrain::Terrain;

/// Every room visible this tick, keyed by name.
///
/// Rooms absent from the snapshot are simply not visible; linear queries skip
/// them and path searches traverse them blind (see [`crate::path`]).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorldSnapshot {
    rooms: BTreeMap<RoomName, RoomSnapshot>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rooms(rooms: impl IntoIterator<Item = RoomSnapshot>) -> Self {
        Self {
            rooms: rooms.into_iter().map(|r| (r.name(), r)).collect(),
        }
    }

    /// Adds or replaces one room view.
    pub fn insert_room(&mut self, room: RoomSnapshot) {
        self.rooms.insert(room.name(), room);
    }

    pub fn room(&self, name: RoomName) -> Option<&RoomSnapshot> {
        self.rooms.get(&name)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomSnapshot> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// True if the position lies in a visible room.
    pub fn contains(&self, position: Position) -> bool {
        self.rooms.contains_key(&position.room())
    }

    /// Terrain under a position, `None` when the room is not visible.
    pub fn terrain_at(&self, position: Position) -> Option<Terrain> {
        self.room(position.room())
            .and_then(|room| room.terrain_at(position))
    }

    /// [`RoomSnapshot::look`] through the world view; empty when the room is
    /// not visible.
    pub fn look(&self, position: Position) -> Vec<LookItem<'_>> {
        self.room(position.room())
            .map(|room| room.look(position))
            .unwrap_or_default()
    }

    /// [`RoomSnapshot::look_for`] through the world view.
    pub fn look_for(&self, position: Position, category: ObjectCategory) -> Vec<&RoomObject> {
        self.room(position.room())
            .map(|room| room.look_for(position, category))
            .unwrap_or_default()
    }
}
