//! Ready-made snapshots for tests and examples.

use world_core::{
    Direction, Ownership, RoomName, RoomSnapshot, Terrain, TerrainGrid, WorldConfig, WorldSnapshot,
};

/// Room of uniform plain terrain under the caller's control.
pub fn open_room(name: RoomName) -> RoomSnapshot {
    RoomSnapshot::new(name, Ownership::Mine, TerrainGrid::default(), Vec::new())
        .expect("empty room snapshot is always valid")
}

/// Room with an impassable border wall and a swamp band through the middle.
pub fn walled_room(name: RoomName) -> RoomSnapshot {
    let edge = WorldConfig::ROOM_SIZE - 1;
    let terrain = TerrainGrid::from_fn(|x, y| {
        if x == 0 || y == 0 || x == edge || y == edge {
            Terrain::Wall
        } else if y == WorldConfig::ROOM_SIZE / 2 {
            Terrain::Swamp
        } else {
            Terrain::Plain
        }
    });
    RoomSnapshot::new(name, Ownership::Mine, terrain, Vec::new())
        .expect("walled room snapshot is always valid")
}

/// Two open rooms sharing their east/west seam, anchored at `W1N1`.
pub fn two_room_world() -> WorldSnapshot {
    let west: RoomName = "W1N1".parse().expect("anchor room name is valid");
    let east = west
        .neighbor(Direction::Right)
        .expect("anchor room has an east neighbor");
    WorldSnapshot::from_rooms([open_room(west), open_room(east)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::Position;

    #[test]
    fn walled_room_blocks_its_border() {
        let name: RoomName = "E1S1".parse().unwrap();
        let room = walled_room(name);
        let border = Position::new(0, 10, name).unwrap();
        let inside = Position::new(10, 10, name).unwrap();
        assert_eq!(room.terrain_at(border), Some(Terrain::Wall));
        assert_eq!(room.terrain_at(inside), Some(Terrain::Plain));
    }

    #[test]
    fn two_room_world_is_contiguous() {
        let world = two_room_world();
        assert_eq!(world.len(), 2);
        let west: RoomName = "W1N1".parse().unwrap();
        let edge = Position::new(49, 25, west).unwrap();
        let across = edge.step(Direction::Right).unwrap();
        assert!(world.contains(across));
    }
}
