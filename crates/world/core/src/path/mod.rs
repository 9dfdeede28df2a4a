//! Terrain-aware shortest paths.
//!
//! [`find_path`] is a state-free function over one [`WorldSnapshot`]: no
//! caches, no suspension points, and a hard node/room budget instead of
//! cancellation. Running out of budget is not an error; the search returns
//! the closest reachable prefix with [`Path::incomplete`] set.
mod search;

pub(crate) use search::search_closest;

use crate::config::WorldConfig;
use crate::error::{ErrorSeverity, WorldError};
use crate::position::{Direction, Position};
use crate::room::WorldSnapshot;

/// Which search to run. `Auto` resolves from the shape of the target set:
/// A* for small or distant target sets, Dijkstra's flood fill for large or
/// nearby ones. A performance hint, never a correctness knob.
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
pub enum PathAlgorithm {
    #[default]
    Auto,
    AStar,
    Dijkstra,
}

/// Search configuration.
///
/// Costs and budgets must satisfy [`PathOptions::validate`]; every search
/// entry point validates before touching the map. Engine options this core
/// does not model are ignored rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathOptions {
    pub algorithm: PathAlgorithm,
    /// Treat cells holding creeps as walkable.
    pub ignore_creeps: bool,
    /// Treat destructible structures (walls, ramparts, spawns, ...) as
    /// walkable.
    pub ignore_destructible_structures: bool,
    /// Skip the road cost override; roads then cost their terrain class.
    pub ignore_roads: bool,
    /// Cost of a plain cell. Must be at least 1.
    pub plain_cost: u32,
    /// Cost of a swamp cell. Must be at least 1.
    pub swamp_cost: u32,
    /// Node-expansion budget. Must be positive.
    pub max_ops: u32,
    /// Distinct-room budget, within `1..=16`.
    pub max_rooms: u8,
    /// Stop once within this linear range of the target.
    pub range: u32,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            algorithm: PathAlgorithm::Auto,
            ignore_creeps: false,
            ignore_destructible_structures: false,
            ignore_roads: false,
            plain_cost: WorldConfig::DEFAULT_PLAIN_COST,
            swamp_cost: WorldConfig::DEFAULT_SWAMP_COST,
            max_ops: WorldConfig::DEFAULT_MAX_OPS,
            max_rooms: WorldConfig::MAX_SEARCH_ROOMS,
            range: 0,
        }
    }
}

impl PathOptions {
    /// Search defaults seeded from a world configuration.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            plain_cost: config.plain_cost,
            swamp_cost: config.swamp_cost,
            max_ops: config.max_ops,
            max_rooms: config.max_rooms,
            ..Self::default()
        }
    }

    /// Checks the numeric ranges the engine relies on.
    pub fn validate(&self) -> Result<(), PathOptionsError> {
        if self.plain_cost < 1 {
            return Err(PathOptionsError::ZeroCost { field: "plain_cost" });
        }
        if self.swamp_cost < 1 {
            return Err(PathOptionsError::ZeroCost { field: "swamp_cost" });
        }
        if self.max_ops == 0 {
            return Err(PathOptionsError::ZeroOps);
        }
        if self.max_rooms == 0 || self.max_rooms > WorldConfig::MAX_SEARCH_ROOMS {
            return Err(PathOptionsError::MaxRoomsOutOfRange {
                value: self.max_rooms,
            });
        }
        Ok(())
    }
}

/// Invalid numeric ranges in [`PathOptions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathOptionsError {
    #[error("{field} must be at least 1")]
    ZeroCost { field: &'static str },

    #[error("max_ops must be positive")]
    ZeroOps,

    #[error("max_rooms must lie within 1..={max}, got {value}", max = WorldConfig::MAX_SEARCH_ROOMS)]
    MaxRoomsOutOfRange { value: u8 },
}

impl WorldError for PathOptionsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// One grid transition: the cell stepped onto (room-local) plus direction
/// metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub x: u8,
    pub y: u8,
    pub dx: i8,
    pub dy: i8,
    pub direction: Direction,
}

/// Result of one path search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Steps from origin to destination, origin excluded.
    pub steps: Vec<PathStep>,
    /// Accumulated movement cost of the steps.
    pub cost: u32,
    /// Nodes the search expanded.
    pub ops_used: u32,
    /// True when a budget cap cut the search short; the steps then lead to
    /// the closest reachable cell instead of the target.
    pub incomplete: bool,
}

impl Path {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Shortest path from `from` to within `options.range` of `to`.
///
/// A search from a position to itself (or any target already in range)
/// returns an empty, complete path. Budget exhaustion returns the closest
/// reachable prefix, never an error; only malformed options fail.
pub fn find_path(
    from: Position,
    to: Position,
    world: &WorldSnapshot,
    options: &PathOptions,
) -> Result<Path, PathOptionsError> {
    options.validate()?;
    let use_heuristic = !matches!(options.algorithm, PathAlgorithm::Dijkstra);
    Ok(search::search_path(from, to, world, options, use_heuristic))
}

/// Errors raised while decoding a serialized path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCodecError {
    #[error("serialized path is shorter than its 4-digit header")]
    TooShort,

    #[error("serialized path contains a non-digit byte")]
    BadDigit,

    #[error("serialized path contains direction digit {value}")]
    BadDirection { value: u8 },
}

impl WorldError for PathCodecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Compact string form of a step sequence: the first step's cell as two
/// zero-padded 2-digit coordinates, then one direction digit per step.
/// Empty paths serialize to the empty string.
pub fn serialize_steps(steps: &[PathStep]) -> String {
    let Some(first) = steps.first() else {
        return String::new();
    };
    let mut out = format!("{:02}{:02}", first.x, first.y);
    for step in steps {
        out.push(char::from(b'0' + step.direction.wire_value()));
    }
    out
}

/// Decodes [`serialize_steps`] output. Room-edge wraparound is reapplied,
/// so multi-room step sequences survive the round trip.
pub fn deserialize_steps(serialized: &str) -> Result<Vec<PathStep>, PathCodecError> {
    if serialized.is_empty() {
        return Ok(Vec::new());
    }
    if serialized.len() < 5 {
        return Err(PathCodecError::TooShort);
    }
    let digits: Vec<u8> = serialized
        .bytes()
        .map(|b| {
            b.is_ascii_digit()
                .then_some(b - b'0')
                .ok_or(PathCodecError::BadDigit)
        })
        .collect::<Result<_, _>>()?;

    let size = i16::from(WorldConfig::ROOM_SIZE);
    let mut x = i16::from(digits[0] * 10 + digits[1]);
    let mut y = i16::from(digits[2] * 10 + digits[3]);
    let mut steps = Vec::with_capacity(digits.len() - 4);
    for (index, &digit) in digits[4..].iter().enumerate() {
        let direction =
            Direction::from_wire(digit).ok_or(PathCodecError::BadDirection { value: digit })?;
        let (dx, dy) = direction.delta();
        if index > 0 {
            x = (x + i16::from(dx)).rem_euclid(size);
            y = (y + i16::from(dy)).rem_euclid(size);
        }
        steps.push(PathStep {
            x: x as u8,
            y: y as u8,
            dx,
            dy,
            direction,
        });
    }
    Ok(steps)
}
