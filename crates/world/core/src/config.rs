/// Platform limits and tunable search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Movement cost charged for a plain cell.
    pub plain_cost: u32,
    /// Movement cost charged for a swamp cell.
    pub swamp_cost: u32,
    /// Node-expansion budget for a single path search.
    pub max_ops: u32,
    /// Maximum distinct rooms a single path search may enter.
    pub max_rooms: u8,
}

impl WorldConfig {
    // ===== compile-time constants used as type parameters =====
    /// Side length of every room grid. Coordinates run `0..ROOM_SIZE`.
    pub const ROOM_SIZE: u8 = 50;
    /// Platform-wide cap on flags owned by one player.
    pub const MAX_FLAGS: usize = 10_000;
    /// Platform-wide cap on pending construction sites.
    pub const MAX_CONSTRUCTION_SITES: usize = 100;
    /// Hard ceiling for `max_rooms`; searches may never span more rooms.
    pub const MAX_SEARCH_ROOMS: u8 = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAIN_COST: u32 = 1;
    pub const DEFAULT_SWAMP_COST: u32 = 5;
    pub const DEFAULT_MAX_OPS: u32 = 2_000;

    pub fn new() -> Self {
        Self {
            plain_cost: Self::DEFAULT_PLAIN_COST,
            swamp_cost: Self::DEFAULT_SWAMP_COST,
            max_ops: Self::DEFAULT_MAX_OPS,
            max_rooms: Self::MAX_SEARCH_ROOMS,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}
