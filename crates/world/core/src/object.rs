use core::fmt;

use crate::position::{Position, Positioned};

/// Unique identifier for any object inside a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structure classes relevant to movement and construction.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StructureKind {
    Road,
    Container,
    Rampart,
    Wall,
    Spawn,
    Extension,
    Tower,
    Storage,
}

impl StructureKind {
    /// Structures a creep can stand on or walk through.
    pub fn is_walkable(self) -> bool {
        matches!(
            self,
            StructureKind::Road | StructureKind::Container | StructureKind::Rampart
        )
    }

    /// Structures that can be walked through when a search opts into
    /// ignoring destructible obstacles.
    pub fn is_destructible(self) -> bool {
        !matches!(self, StructureKind::Road | StructureKind::Container)
    }
}

/// What kind of entity occupies a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    Creep { hostile: bool },
    Structure(StructureKind),
    Flag { name: String },
    ConstructionSite(StructureKind),
}

impl ObjectKind {
    pub fn category(&self) -> ObjectCategory {
        match self {
            ObjectKind::Creep { .. } => ObjectCategory::Creep,
            ObjectKind::Structure(_) => ObjectCategory::Structure,
            ObjectKind::Flag { .. } => ObjectCategory::Flag,
            ObjectKind::ConstructionSite(_) => ObjectCategory::ConstructionSite,
        }
    }
}

/// Entity kind selector for [`crate::room::RoomSnapshot::look_for`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ObjectCategory {
    Creep,
    Structure,
    Flag,
    ConstructionSite,
}

/// One positioned entity inside a room snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub position: Position,
}

impl RoomObject {
    pub fn new(id: ObjectId, kind: ObjectKind, position: Position) -> Self {
        Self { id, kind, position }
    }
}

impl Positioned for RoomObject {
    fn pos(&self) -> Position {
        self.position
    }
}
