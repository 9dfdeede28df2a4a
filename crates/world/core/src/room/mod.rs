//! Immutable per-tick views of rooms and the visible world.
//!
//! A [`RoomSnapshot`] is read-only after construction; every query in this
//! crate runs against one set of snapshots, so nothing can mutate underneath
//! a search.
mod world;

pub use world::WorldSnapshot;

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, WorldError};
use crate::object::{ObjectCategory, ObjectId, RoomObject};
use crate::position::{Position, PositionError, RoomName};
use crate::terrain::{Terrain, TerrainGrid};

/// Who controls a room, as far as commands are concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ownership {
    Mine,
    Hostile,
    #[default]
    Neutral,
}

/// Errors raised while assembling a room snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotError {
    /// An object was placed in a different room than the snapshot covers.
    #[error("object {id} at {position} does not belong to room {room}")]
    ForeignObject {
        id: ObjectId,
        position: Position,
        room: RoomName,
    },
}

impl WorldError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// One entry returned by [`RoomSnapshot::look`].
///
/// Every cell yields exactly one `Terrain` entry (always last), plus one
/// `Object` entry per entity occupying it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LookItem<'a> {
    Object(&'a RoomObject),
    Terrain(Terrain),
}

/// Read-only view of one room at query time: terrain plus every visible
/// entity, indexed by cell.
// Serialize-only: reconstruction goes through `RoomSnapshot::new` so the
// cell index is always rebuilt.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoomSnapshot {
    name: RoomName,
    ownership: Ownership,
    terrain: TerrainGrid,
    objects: Vec<RoomObject>,
    // Cell index into `objects`, rebuilt on construction. BTreeMap keeps
    // iteration deterministic.
    #[cfg_attr(feature = "serde", serde(skip))]
    by_cell: BTreeMap<(u8, u8), Vec<usize>>,
}

impl RoomSnapshot {
    /// Assembles a snapshot, validating that every object belongs to this
    /// room and building the cell index.
    pub fn new(
        name: RoomName,
        ownership: Ownership,
        terrain: TerrainGrid,
        objects: Vec<RoomObject>,
    ) -> Result<Self, SnapshotError> {
        let mut by_cell: BTreeMap<(u8, u8), Vec<usize>> = BTreeMap::new();
        for (index, object) in objects.iter().enumerate() {
            if object.position.room() != name {
                return Err(SnapshotError::ForeignObject {
                    id: object.id,
                    position: object.position,
                    room: name,
                });
            }
            by_cell
                .entry((object.position.x(), object.position.y()))
                .or_default()
                .push(index);
        }
        Ok(Self {
            name,
            ownership,
            terrain,
            objects,
            by_cell,
        })
    }

    /// Empty snapshot over uniform plain terrain.
    pub fn empty(name: RoomName) -> Self {
        Self {
            name,
            ownership: Ownership::default(),
            terrain: TerrainGrid::default(),
            objects: Vec::new(),
            by_cell: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> RoomName {
        self.name
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    /// Validated position inside this room.
    pub fn position_at(&self, x: u8, y: u8) -> Result<Position, PositionError> {
        Position::new(x, y, self.name)
    }

    /// Terrain under a position, `None` if the position is in another room.
    pub fn terrain_at(&self, position: Position) -> Option<Terrain> {
        (position.room() == self.name).then(|| self.terrain.get(position.x(), position.y()))
    }

    pub fn objects(&self) -> &[RoomObject] {
        &self.objects
    }

    /// Every object occupying the given cell, in insertion order.
    pub fn objects_at(&self, position: Position) -> impl Iterator<Item = &RoomObject> {
        let indices = (position.room() == self.name)
            .then(|| self.by_cell.get(&(position.x(), position.y())))
            .flatten()
            .map_or(&[][..], |v| v.as_slice());
        indices.iter().map(|&i| &self.objects[i])
    }

    /// Snapshot of everything occupying one cell.
    ///
    /// The result always contains exactly one terrain entry, after any
    /// object entries. Empty for positions outside this room.
    pub fn look(&self, position: Position) -> Vec<LookItem<'_>> {
        let Some(terrain) = self.terrain_at(position) else {
            return Vec::new();
        };
        let mut items: Vec<LookItem<'_>> =
            self.objects_at(position).map(LookItem::Object).collect();
        items.push(LookItem::Terrain(terrain));
        items
    }

    /// [`look`](Self::look) filtered down to one entity kind.
    pub fn look_for(&self, position: Position, category: ObjectCategory) -> Vec<&RoomObject> {
        self.objects_at(position)
            .filter(|object| object.kind.category() == category)
            .collect()
    }
}
