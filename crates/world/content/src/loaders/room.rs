//! Room snapshot loader.
//!
//! Loads terrain rows and object placement for one room from RON files.
//! Terrain rows are 50 strings of 50 characters: `.` plain, `~` swamp,
//! `#` wall.

use std::path::Path;

use serde::{Deserialize, Serialize};
use world_core::{
    ObjectId, ObjectKind, Ownership, Position, RoomName, RoomObject, RoomSnapshot, Terrain,
    TerrainGrid, WorldConfig,
};

use crate::loaders::{LoadResult, read_file};

/// Room data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoomDataRon {
    name: String,
    #[serde(default)]
    ownership: Ownership,
    rows: Vec<String>,
    #[serde(default)]
    objects: Vec<ObjectRon>,
}

/// One placed object; ids are assigned by position in the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectRon {
    x: u8,
    y: u8,
    kind: ObjectKind,
}

/// Loader for room snapshots from RON files.
pub struct RoomLoader;

impl RoomLoader {
    /// Load one room snapshot from a RON file.
    pub fn load(path: &Path) -> LoadResult<RoomSnapshot> {
        let content = read_file(path)?;
        Self::from_str(&content)
            .map_err(|e| anyhow::anyhow!("in room file {}: {}", path.display(), e))
    }

    /// Parse one room snapshot from RON text.
    pub fn from_str(content: &str) -> LoadResult<RoomSnapshot> {
        let data: RoomDataRon =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse room RON: {e}"))?;

        let name: RoomName = data
            .name
            .parse()
            .map_err(|e| anyhow::anyhow!("bad room name {:?}: {e}", data.name))?;

        let size = usize::from(WorldConfig::ROOM_SIZE);
        if data.rows.len() != size {
            anyhow::bail!("expected {size} terrain rows, found {}", data.rows.len());
        }
        let mut terrain = TerrainGrid::default();
        for (y, row) in data.rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().collect();
            if cells.len() != size {
                anyhow::bail!("terrain row {y} has {} cells, expected {size}", cells.len());
            }
            for (x, cell) in cells.into_iter().enumerate() {
                let terrain_kind = match cell {
                    '.' => Terrain::Plain,
                    '~' => Terrain::Swamp,
                    '#' => Terrain::Wall,
                    other => anyhow::bail!("unknown terrain character {other:?} at ({x}, {y})"),
                };
                terrain.set(x as u8, y as u8, terrain_kind);
            }
        }

        let mut objects = Vec::with_capacity(data.objects.len());
        for (index, object) in data.objects.into_iter().enumerate() {
            let position = Position::new(object.x, object.y, name)
                .map_err(|e| anyhow::anyhow!("object {index} placement: {e}"))?;
            objects.push(RoomObject::new(
                ObjectId(index as u32),
                object.kind,
                position,
            ));
        }

        RoomSnapshot::new(name, data.ownership, terrain, objects)
            .map_err(|e| anyhow::anyhow!("inconsistent room snapshot: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::{ObjectCategory, StructureKind};

    fn ron_room(objects: &str) -> String {
        let mut rows = Vec::new();
        for y in 0..50 {
            let mut row = String::new();
            for x in 0..50 {
                row.push(if y == 0 {
                    '#'
                } else if x == 3 {
                    '~'
                } else {
                    '.'
                });
            }
            rows.push(format!("{row:?}"));
        }
        format!(
            "(name: \"W4N2\", ownership: Mine, rows: [{}], objects: [{}])",
            rows.join(", "),
            objects
        )
    }

    #[test]
    fn parses_terrain_rows_and_objects() {
        let content = ron_room(
            "(x: 10, y: 10, kind: Creep(hostile: false)), \
             (x: 11, y: 10, kind: Structure(Road))",
        );
        let room = RoomLoader::from_str(&content).unwrap();

        let name: RoomName = "W4N2".parse().unwrap();
        assert_eq!(room.name(), name);
        assert_eq!(room.ownership(), Ownership::Mine);
        assert_eq!(
            room.terrain_at(Position::new(5, 0, name).unwrap()),
            Some(Terrain::Wall)
        );
        assert_eq!(
            room.terrain_at(Position::new(3, 10, name).unwrap()),
            Some(Terrain::Swamp)
        );

        let creeps = room.look_for(
            Position::new(10, 10, name).unwrap(),
            ObjectCategory::Creep,
        );
        assert_eq!(creeps.len(), 1);
        let structures = room.look_for(
            Position::new(11, 10, name).unwrap(),
            ObjectCategory::Structure,
        );
        assert_eq!(
            structures[0].kind,
            ObjectKind::Structure(StructureKind::Road)
        );
    }

    #[test]
    fn rejects_wrong_row_counts() {
        let content = "(name: \"W4N2\", rows: [\"...\"], objects: [])";
        let error = RoomLoader::from_str(content).unwrap_err();
        assert!(error.to_string().contains("terrain rows"));
    }

    #[test]
    fn rejects_unknown_terrain_characters() {
        let mut bad = ron_room("");
        bad = bad.replacen("~", "?", 1);
        let error = RoomLoader::from_str(&bad).unwrap_err();
        assert!(error.to_string().contains("unknown terrain character"));
    }

    #[test]
    fn rejects_malformed_room_names() {
        let content = ron_room("").replace("W4N2", "nowhere");
        assert!(RoomLoader::from_str(&content).is_err());
    }
}
