//! Construction-site intents.
//!
//! Placing a site never mutates the snapshot: validated requests queue up as
//! intents the host consumes at the end of the tick. The queue is bounded by
//! the platform site cap.

use bounded_vector::BoundedVec;
use core::fmt;

use crate::command::{CommandError, CommandResult};
use crate::config::WorldConfig;
use crate::object::{ObjectCategory, ObjectKind, StructureKind};
use crate::position::Position;
use crate::room::{Ownership, WorldSnapshot};
use crate::terrain::Terrain;

/// Identifier handed back for a queued construction intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteId(pub u32);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site#{}", self.0)
    }
}

/// One validated construction request, forwarded to the host verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructionIntent {
    pub id: SiteId,
    pub kind: StructureKind,
    pub position: Position,
}

/// Pending construction intents for the current tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructionQueue {
    pending: BoundedVec<ConstructionIntent, 0, { WorldConfig::MAX_CONSTRUCTION_SITES }>,
    next_id: u32,
}

impl ConstructionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstructionIntent> {
        self.pending.iter()
    }

    /// Queues a construction site at the given position.
    ///
    /// Failure codes: `InvalidTarget` for invisible rooms, walls, or cells
    /// already holding a blocking structure or another site;
    /// `InsufficientPermission` in hostile rooms; `Full` at the platform
    /// site cap.
    pub fn create_construction_site(
        &mut self,
        position: Position,
        kind: StructureKind,
        world: &WorldSnapshot,
    ) -> CommandResult<SiteId> {
        let room = world
            .room(position.room())
            .ok_or(CommandError::InvalidTarget)?;
        if room.ownership() == Ownership::Hostile {
            return Err(CommandError::InsufficientPermission);
        }
        if room
            .terrain_at(position)
            .is_none_or(|terrain| terrain == Terrain::Wall)
        {
            return Err(CommandError::InvalidTarget);
        }
        let cell_blocked = room.objects_at(position).any(|object| match &object.kind {
            ObjectKind::Structure(structure) => !structure.is_walkable(),
            ObjectKind::ConstructionSite(_) => true,
            _ => false,
        }) || self
            .pending
            .iter()
            .any(|intent| intent.position == position);
        if cell_blocked {
            return Err(CommandError::InvalidTarget);
        }

        if self.pending.len() + world_site_count(world) >= WorldConfig::MAX_CONSTRUCTION_SITES {
            return Err(CommandError::Full);
        }

        self.next_id += 1;
        let id = SiteId(self.next_id);
        self.pending
            .push(ConstructionIntent { id, kind, position })
            .map_err(|_| CommandError::Full)?;
        Ok(id)
    }

    /// Hands all pending intents to the host and clears the queue.
    pub fn drain(&mut self) -> Vec<ConstructionIntent> {
        let drained = core::mem::take(&mut self.pending);
        drained.iter().cloned().collect()
    }
}

/// Sites already standing in the visible world count against the cap.
fn world_site_count(world: &WorldSnapshot) -> usize {
    world
        .rooms()
        .flat_map(|room| room.objects())
        .filter(|object| object.kind.category() == ObjectCategory::ConstructionSite)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectId, RoomObject};
    use crate::position::RoomName;
    use crate::room::RoomSnapshot;
    use crate::terrain::TerrainGrid;

    fn name() -> RoomName {
        "E5S5".parse().unwrap()
    }

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y, name()).unwrap()
    }

    fn owned_world(ownership: Ownership, objects: Vec<RoomObject>) -> WorldSnapshot {
        let mut terrain = TerrainGrid::default();
        terrain.set(0, 0, Terrain::Wall);
        WorldSnapshot::from_rooms([
            RoomSnapshot::new(name(), ownership, terrain, objects).unwrap()
        ])
    }

    #[test]
    fn queues_intents_with_fresh_ids() {
        let world = owned_world(Ownership::Mine, Vec::new());
        let mut queue = ConstructionQueue::new();
        let a = queue
            .create_construction_site(pos(3, 3), StructureKind::Extension, &world)
            .unwrap();
        let b = queue
            .create_construction_site(pos(4, 3), StructureKind::Road, &world)
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn walls_are_invalid_targets() {
        let world = owned_world(Ownership::Mine, Vec::new());
        let mut queue = ConstructionQueue::new();
        assert_eq!(
            queue.create_construction_site(pos(0, 0), StructureKind::Spawn, &world),
            Err(CommandError::InvalidTarget)
        );
    }

    #[test]
    fn hostile_rooms_need_permission() {
        let world = owned_world(Ownership::Hostile, Vec::new());
        let mut queue = ConstructionQueue::new();
        assert_eq!(
            queue.create_construction_site(pos(3, 3), StructureKind::Tower, &world),
            Err(CommandError::InsufficientPermission)
        );
    }

    #[test]
    fn occupied_cells_are_invalid_targets() {
        let blocking = RoomObject::new(
            ObjectId(1),
            ObjectKind::Structure(StructureKind::Spawn),
            pos(7, 7),
        );
        let world = owned_world(Ownership::Mine, vec![blocking]);
        let mut queue = ConstructionQueue::new();
        assert_eq!(
            queue.create_construction_site(pos(7, 7), StructureKind::Extension, &world),
            Err(CommandError::InvalidTarget)
        );

        // A road under construction elsewhere in the queue blocks too.
        queue
            .create_construction_site(pos(8, 8), StructureKind::Road, &world)
            .unwrap();
        assert_eq!(
            queue.create_construction_site(pos(8, 8), StructureKind::Extension, &world),
            Err(CommandError::InvalidTarget)
        );
    }

    #[test]
    fn standing_sites_count_against_the_cap() {
        let sites: Vec<RoomObject> = (0..WorldConfig::MAX_CONSTRUCTION_SITES)
            .map(|i| {
                RoomObject::new(
                    ObjectId(i as u32),
                    ObjectKind::ConstructionSite(StructureKind::Extension),
                    pos((i % 50) as u8, (i / 50) as u8 + 1),
                )
            })
            .collect();
        let world = owned_world(Ownership::Mine, sites);
        let mut queue = ConstructionQueue::new();
        assert_eq!(
            queue.create_construction_site(pos(30, 30), StructureKind::Road, &world),
            Err(CommandError::Full)
        );
    }
}
