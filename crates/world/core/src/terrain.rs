use core::fmt;

use crate::config::WorldConfig;

/// Canonical terrain classes for room cells.
///
/// Movement costs are attached by [`crate::path::PathOptions`], not here;
/// terrain only fixes the cost *class* of a cell.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Terrain {
    #[default]
    Plain,
    Swamp,
    Wall,
}

impl Terrain {
    pub fn is_walkable(self) -> bool {
        !matches!(self, Terrain::Wall)
    }
}

/// Row-major grid covering every cell of one room.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainGrid {
    cells: Vec<Terrain>,
}

impl TerrainGrid {
    const SIZE: usize = WorldConfig::ROOM_SIZE as usize;

    /// Grid with every cell set to the same terrain.
    pub fn uniform(terrain: Terrain) -> Self {
        Self {
            cells: vec![terrain; Self::SIZE * Self::SIZE],
        }
    }

    /// Grid built cell by cell from a closure over `(x, y)`.
    pub fn from_fn(mut f: impl FnMut(u8, u8) -> Terrain) -> Self {
        let mut cells = Vec::with_capacity(Self::SIZE * Self::SIZE);
        for y in 0..WorldConfig::ROOM_SIZE {
            for x in 0..WorldConfig::ROOM_SIZE {
                cells.push(f(x, y));
            }
        }
        Self { cells }
    }

    /// Terrain of the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the room grid; positions built
    /// through [`crate::Position`] are always in bounds.
    pub fn get(&self, x: u8, y: u8) -> Terrain {
        assert!(
            x < WorldConfig::ROOM_SIZE && y < WorldConfig::ROOM_SIZE,
            "terrain coordinate ({x}, {y}) outside the room grid"
        );
        self.cells[usize::from(y) * Self::SIZE + usize::from(x)]
    }

    pub fn set(&mut self, x: u8, y: u8, terrain: Terrain) {
        assert!(
            x < WorldConfig::ROOM_SIZE && y < WorldConfig::ROOM_SIZE,
            "terrain coordinate ({x}, {y}) outside the room grid"
        );
        self.cells[usize::from(y) * Self::SIZE + usize::from(x)] = terrain;
    }
}

impl Default for TerrainGrid {
    fn default() -> Self {
        Self::uniform(Terrain::Plain)
    }
}

impl fmt::Debug for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let walls = self.cells.iter().filter(|t| **t == Terrain::Wall).count();
        let swamps = self.cells.iter().filter(|t| **t == Terrain::Swamp).count();
        write!(
            f,
            "TerrainGrid({size}x{size}, {walls} walls, {swamps} swamps)",
            size = Self::SIZE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_grids_read_back_everywhere() {
        let grid = TerrainGrid::uniform(Terrain::Swamp);
        assert_eq!(grid.get(0, 0), Terrain::Swamp);
        assert_eq!(grid.get(49, 49), Terrain::Swamp);
    }

    #[test]
    fn from_fn_is_row_major_by_xy() {
        let grid = TerrainGrid::from_fn(|x, y| {
            if x == 3 && y == 7 {
                Terrain::Wall
            } else {
                Terrain::Plain
            }
        });
        assert_eq!(grid.get(3, 7), Terrain::Wall);
        assert_eq!(grid.get(7, 3), Terrain::Plain);
    }

    #[test]
    #[should_panic(expected = "outside the room grid")]
    fn out_of_grid_reads_panic() {
        TerrainGrid::default().get(50, 0);
    }
}
