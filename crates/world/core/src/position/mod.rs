//! Coordinates on the world grid.
//!
//! A [`Position`] names one cell of one room. Linear (Chebyshev) range and
//! compass direction queries live here; anything that needs terrain or path
//! costs goes through [`crate::path`] instead.
mod direction;
mod room_name;

pub use direction::Direction;
pub use room_name::{RoomName, RoomNameError};

use crate::config::WorldConfig;
use crate::error::{ErrorSeverity, WorldError};

/// Errors raised when constructing a position from raw coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionError {
    /// Coordinate lies outside the fixed room grid.
    #[error("coordinate ({x}, {y}) is outside the {size}x{size} room grid", size = WorldConfig::ROOM_SIZE)]
    OutOfBounds { x: u8, y: u8 },
}

impl WorldError for PositionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Linear range between positions in different rooms is undefined; route the
/// query through a path search instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("linear range from {from} to {to} is undefined across rooms")]
pub struct CrossRoomError {
    pub from: RoomName,
    pub to: RoomName,
}

impl WorldError for CrossRoomError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Errors raised by [`Position::direction_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionError {
    /// The two positions coincide, so no compass direction exists.
    #[error("direction between equal positions is undefined")]
    Undefined,
}

impl WorldError for DirectionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Anything that occupies a cell and can stand in for its position.
///
/// Query entry points normalize every target through this trait, so callers
/// can pass a bare [`Position`] or any positioned entity interchangeably.
pub trait Positioned {
    fn pos(&self) -> Position;
}

impl Positioned for Position {
    fn pos(&self) -> Position {
        *self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn pos(&self) -> Position {
        (**self).pos()
    }
}

/// One cell of one room, immutable after construction.
///
/// `x` and `y` are guaranteed to lie inside the room grid; the fields are
/// only reachable through accessors so the invariant cannot be broken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    room: RoomName,
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a position, validating the grid bounds.
    pub fn new(x: u8, y: u8, room: RoomName) -> Result<Self, PositionError> {
        if x < WorldConfig::ROOM_SIZE && y < WorldConfig::ROOM_SIZE {
            Ok(Self { room, x, y })
        } else {
            Err(PositionError::OutOfBounds { x, y })
        }
    }

    pub const fn x(self) -> u8 {
        self.x
    }

    pub const fn y(self) -> u8 {
        self.y
    }

    pub const fn room(self) -> RoomName {
        self.room
    }

    /// Absolute world coordinates (`room index * ROOM_SIZE + cell`).
    pub fn world_xy(self) -> (i32, i32) {
        let size = WorldConfig::ROOM_SIZE as i32;
        (
            self.room.col() as i32 * size + self.x as i32,
            self.room.row() as i32 * size + self.y as i32,
        )
    }

    /// Chebyshev distance to `other`, the platform's notion of linear range.
    ///
    /// Positions in different rooms have no linear range; such queries must
    /// go through a path search.
    pub fn range_to<T: Positioned + ?Sized>(&self, other: &T) -> Result<u32, CrossRoomError> {
        let other = other.pos();
        if other.room != self.room {
            return Err(CrossRoomError {
                from: self.room,
                to: other.room,
            });
        }
        let dx = (self.x as i32 - other.x as i32).unsigned_abs();
        let dy = (self.y as i32 - other.y as i32).unsigned_abs();
        Ok(dx.max(dy))
    }

    /// True if `other` lies within `range` cells. Positions in other rooms
    /// are never in linear range.
    pub fn in_range_to<T: Positioned + ?Sized>(&self, other: &T, range: u32) -> bool {
        self.range_to(other).is_ok_and(|r| r <= range)
    }

    /// True if `other` occupies this or an adjacent cell.
    pub fn is_near_to<T: Positioned + ?Sized>(&self, other: &T) -> bool {
        self.in_range_to(other, 1)
    }

    /// Compass heading toward `other`, from the signs of the world-coordinate
    /// offset. Works across rooms; equal positions have no direction.
    pub fn direction_to<T: Positioned + ?Sized>(&self, other: &T) -> Result<Direction, DirectionError> {
        let (ax, ay) = self.world_xy();
        let (bx, by) = other.pos().world_xy();
        Direction::from_delta((bx - ax) as i64, (by - ay) as i64).ok_or(DirectionError::Undefined)
    }

    /// The adjacent cell one step away, crossing into the neighbor room at
    /// a grid edge. `None` only past the edge of the world.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let size = WorldConfig::ROOM_SIZE as i16;
        let (dx, dy) = direction.delta();
        let nx = self.x as i16 + dx as i16;
        let ny = self.y as i16 + dy as i16;

        let col_shift = nx.div_euclid(size);
        let row_shift = ny.div_euclid(size);
        let room = if col_shift == 0 && row_shift == 0 {
            self.room
        } else {
            RoomName::from_indices(self.room.col() + col_shift, self.room.row() + row_shift).ok()?
        };

        Some(Self {
            room,
            x: nx.rem_euclid(size) as u8,
            y: ny.rem_euclid(size) as u8,
        })
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{} {},{}]", self.room, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> RoomName {
        name.parse().unwrap()
    }

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y, room("W1N1")).unwrap()
    }

    #[test]
    fn rejects_out_of_grid_coordinates() {
        assert_eq!(
            Position::new(50, 0, room("W1N1")),
            Err(PositionError::OutOfBounds { x: 50, y: 0 })
        );
        assert!(Position::new(49, 49, room("W1N1")).is_ok());
    }

    #[test]
    fn range_is_chebyshev() {
        // (10,5) -> (13,5): three cells to the right.
        assert_eq!(pos(10, 5).range_to(&pos(13, 5)), Ok(3));
        assert_eq!(pos(10, 5).range_to(&pos(13, 8)), Ok(3));
        assert_eq!(pos(0, 0).range_to(&pos(1, 7)), Ok(7));
    }

    #[test]
    fn range_is_symmetric() {
        let (a, b) = (pos(3, 41), pos(27, 6));
        assert_eq!(a.range_to(&b), b.range_to(&a));
    }

    #[test]
    fn range_to_self_is_zero() {
        let p = pos(17, 23);
        assert_eq!(p, p);
        assert_eq!(p.range_to(&p), Ok(0));
    }

    #[test]
    fn range_across_rooms_is_undefined() {
        let here = pos(10, 10);
        let there = Position::new(10, 10, room("W2N1")).unwrap();
        assert!(here.range_to(&there).is_err());
        assert!(!here.in_range_to(&there, 100));
        assert!(!here.is_near_to(&there));
    }

    #[test]
    fn direction_follows_offset_signs() {
        assert_eq!(pos(10, 5).direction_to(&pos(13, 5)), Ok(Direction::Right));
        assert_eq!(pos(10, 5).direction_to(&pos(10, 4)), Ok(Direction::Top));
        assert_eq!(
            pos(10, 5).direction_to(&pos(2, 30)),
            Ok(Direction::BottomLeft)
        );
        assert_eq!(
            pos(10, 5).direction_to(&pos(10, 5)),
            Err(DirectionError::Undefined)
        );
    }

    #[test]
    fn direction_resolves_across_rooms() {
        let here = pos(25, 25);
        let east = Position::new(0, 25, here.room().neighbor(Direction::Right).unwrap()).unwrap();
        assert_eq!(here.direction_to(&east), Ok(Direction::Right));
    }

    #[test]
    fn step_stays_inside_the_room() {
        assert_eq!(pos(10, 10).step(Direction::TopRight), Some(pos(11, 9)));
    }

    #[test]
    fn step_wraps_into_the_neighbor_room() {
        let west_edge = pos(0, 10);
        let stepped = west_edge.step(Direction::Left).unwrap();
        assert_eq!(stepped.x(), 49);
        assert_eq!(stepped.y(), 10);
        assert_eq!(stepped.room(), room("W2N1"));

        // Corner step crosses two seams at once.
        let corner = pos(0, 0);
        let across = corner.step(Direction::TopLeft).unwrap();
        assert_eq!((across.x(), across.y()), (49, 49));
        assert_eq!(across.room(), room("W2N2"));
    }

    #[test]
    fn world_coordinates_are_continuous_across_the_seam() {
        let edge = pos(49, 10);
        let next = edge.step(Direction::Right).unwrap();
        let (ex, _) = edge.world_xy();
        let (nx, _) = next.world_xy();
        assert_eq!(nx, ex + 1);
    }
}
