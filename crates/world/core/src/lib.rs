//! Deterministic spatial queries over a world of named 50x50 rooms.
//!
//! `world-core` defines the canonical position model, per-tick room
//! snapshots, spatial queries, terrain-aware path search, and the flag
//! registry, and exposes pure APIs that can be replayed against any recorded
//! snapshot. Queries never mutate; all mutation flows through registry and
//! queue commands that report [`command::ReturnCode`]-mapped errors, and
//! supporting crates depend on the types re-exported here.
pub mod command;
pub mod config;
pub mod construction;
pub mod error;
pub mod flag;
pub mod object;
pub mod path;
pub mod position;
pub mod query;
pub mod room;
pub mod terrain;

pub use command::{CommandError, CommandResult, ReturnCode};
pub use config::WorldConfig;
pub use construction::{ConstructionIntent, ConstructionQueue, SiteId};
pub use error::{ErrorSeverity, WorldError};
pub use flag::{Color, Flag, FlagRegistry, FlagSpec};
pub use object::{ObjectCategory, ObjectId, ObjectKind, RoomObject, StructureKind};
pub use path::{
    Path, PathAlgorithm, PathCodecError, PathOptions, PathOptionsError, PathStep,
    deserialize_steps, find_path, serialize_steps,
};
pub use position::{
    CrossRoomError, Direction, DirectionError, Position, PositionError, Positioned, RoomName,
    RoomNameError,
};
pub use query::{find_closest_by_path, find_closest_by_range, find_in_range};
pub use room::{LookItem, Ownership, RoomSnapshot, SnapshotError, WorldSnapshot};
pub use terrain::{Terrain, TerrainGrid};
