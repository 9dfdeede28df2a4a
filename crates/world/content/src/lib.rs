//! Data-driven room content and loaders.
//!
//! This crate houses ready-made world fixtures and provides loaders for
//! RON/TOML data files:
//! - Room layouts: terrain rows plus object placement (data-driven via RON)
//! - Search defaults (data-driven via TOML)
//!
//! Content is consumed when assembling per-tick snapshots and never appears
//! in query state. All loaders use world-core types directly with serde for
//! RON/TOML deserialization.

pub mod fixtures;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use fixtures::{open_room, two_room_world, walled_room};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, RoomLoader};
