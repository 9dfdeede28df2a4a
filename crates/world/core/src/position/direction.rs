/// One of the eight compass directions used for movement and heading queries.
///
/// Wire values match the engine constants (`TOP = 1` through `TOP_LEFT = 8`,
/// clockwise). The y axis grows southward, so `Top` decreases y.
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
#[repr(u8)]
pub enum Direction {
    Top = 1,
    TopRight = 2,
    Right = 3,
    BottomRight = 4,
    Bottom = 5,
    BottomLeft = 6,
    Left = 7,
    TopLeft = 8,
}

impl Direction {
    /// All directions in wire order (clockwise from `Top`).
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::TopRight,
        Direction::Right,
        Direction::BottomRight,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
    ];

    /// Unit cell offset `(dx, dy)` for one step in this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Top => (0, -1),
            Direction::TopRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::BottomRight => (1, 1),
            Direction::Bottom => (0, 1),
            Direction::BottomLeft => (-1, 1),
            Direction::Left => (-1, 0),
            Direction::TopLeft => (-1, -1),
        }
    }

    /// Direction whose signs match the given offset, `None` for `(0, 0)`.
    ///
    /// Only the signs of `dx`/`dy` matter, so this works for any distance,
    /// not just adjacent cells.
    pub fn from_delta(dx: i64, dy: i64) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Direction::Top),
            (1, -1) => Some(Direction::TopRight),
            (1, 0) => Some(Direction::Right),
            (1, 1) => Some(Direction::BottomRight),
            (0, 1) => Some(Direction::Bottom),
            (-1, 1) => Some(Direction::BottomLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, -1) => Some(Direction::TopLeft),
            _ => None,
        }
    }

    /// The 180-degree reverse of this direction.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::TopRight => Direction::BottomLeft,
            Direction::Right => Direction::Left,
            Direction::BottomRight => Direction::TopLeft,
            Direction::Bottom => Direction::Top,
            Direction::BottomLeft => Direction::TopRight,
            Direction::Left => Direction::Right,
            Direction::TopLeft => Direction::BottomRight,
        }
    }

    /// Numeric engine constant for this direction.
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    /// Parses a numeric engine constant back into a direction.
    pub const fn from_wire(value: u8) -> Option<Direction> {
        match value {
            1 => Some(Direction::Top),
            2 => Some(Direction::TopRight),
            3 => Some(Direction::Right),
            4 => Some(Direction::BottomRight),
            5 => Some(Direction::Bottom),
            6 => Some(Direction::BottomLeft),
            7 => Some(Direction::Left),
            8 => Some(Direction::TopLeft),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_round_trips_through_from_delta() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(
                Direction::from_delta(dx as i64, dy as i64),
                Some(direction)
            );
        }
    }

    #[test]
    fn from_delta_uses_signs_only() {
        assert_eq!(Direction::from_delta(40, 0), Some(Direction::Right));
        assert_eq!(Direction::from_delta(-3, -17), Some(Direction::TopLeft));
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn wire_values_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(
                Direction::from_wire(direction.wire_value()),
                Some(direction)
            );
        }
        assert_eq!(Direction::from_wire(0), None);
        assert_eq!(Direction::from_wire(9), None);
    }
}
