use core::fmt;
use core::str::FromStr;

use crate::error::{ErrorSeverity, WorldError};
use crate::position::Direction;

/// Errors raised while parsing or constructing room names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomNameError {
    /// Input does not match `[WE]<num>[NS]<num>`.
    #[error("malformed room name: expected [WE]<num>[NS]<num>")]
    Malformed,

    /// Room index lies past the edge of the world grid.
    #[error("room index exceeds the world grid bound of {max}", max = RoomName::MAX_INDEX)]
    OutOfWorld,
}

impl WorldError for RoomNameError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Identifier of one 50x50 room on the world grid, e.g. `W1N1` or `E12S3`.
///
/// Stored as a signed pair of world-grid indices so neighbor lookups stay
/// arithmetic: `E0` is column 0 and `W0` column -1, `S0` is row 0 and `N0`
/// row -1. Columns grow eastward, rows grow southward, matching the in-room
/// axes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct RoomName {
    col: i16,
    row: i16,
}

impl RoomName {
    /// Largest sector index representable in either direction (`E999`/`W999`,
    /// `N999`/`S999`). Keeps world coordinates comfortably inside `i32`.
    pub const MAX_INDEX: i16 = 999;

    /// Builds a room name from raw world-grid indices.
    pub fn from_indices(col: i16, row: i16) -> Result<Self, RoomNameError> {
        let bound = -(Self::MAX_INDEX + 1)..=Self::MAX_INDEX;
        if bound.contains(&col) && bound.contains(&row) {
            Ok(Self { col, row })
        } else {
            Err(RoomNameError::OutOfWorld)
        }
    }

    /// World-grid column (eastward positive, `W0` is -1).
    pub const fn col(self) -> i16 {
        self.col
    }

    /// World-grid row (southward positive, `N0` is -1).
    pub const fn row(self) -> i16 {
        self.row
    }

    /// The adjacent room in the given direction, `None` past the world edge.
    pub fn neighbor(self, direction: Direction) -> Option<RoomName> {
        let (dx, dy) = direction.delta();
        Self::from_indices(self.col + dx as i16, self.row + dy as i16).ok()
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col >= 0 {
            write!(f, "E{}", self.col)?;
        } else {
            write!(f, "W{}", -(self.col + 1))?;
        }
        if self.row >= 0 {
            write!(f, "S{}", self.row)
        } else {
            write!(f, "N{}", -(self.row + 1))
        }
    }
}

impl fmt::Debug for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoomName({self})")
    }
}

impl FromStr for RoomName {
    type Err = RoomNameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        fn axis(rest: &str, negative: char, positive: char) -> Option<(bool, &str)> {
            let mut chars = rest.chars();
            match chars.next()?.to_ascii_uppercase() {
                c if c == negative => Some((true, chars.as_str())),
                c if c == positive => Some((false, chars.as_str())),
                _ => None,
            }
        }

        fn index(rest: &str) -> Result<(i16, &str), RoomNameError> {
            let digits: &str = &rest[..rest
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map_or(rest.len(), |(i, _)| i)];
            if digits.is_empty() || digits.len() > 4 {
                return Err(RoomNameError::Malformed);
            }
            let value: i16 = digits.parse().map_err(|_| RoomNameError::Malformed)?;
            if value > RoomName::MAX_INDEX {
                return Err(RoomNameError::OutOfWorld);
            }
            Ok((value, &rest[digits.len()..]))
        }

        let (west, rest) = axis(input, 'W', 'E').ok_or(RoomNameError::Malformed)?;
        let (h, rest) = index(rest)?;
        let (north, rest) = axis(rest, 'N', 'S').ok_or(RoomNameError::Malformed)?;
        let (v, rest) = index(rest)?;
        if !rest.is_empty() {
            return Err(RoomNameError::Malformed);
        }

        let col = if west { -h - 1 } else { h };
        let row = if north { -v - 1 } else { v };
        Self::from_indices(col, row)
    }
}

impl TryFrom<String> for RoomName {
    type Error = RoomNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoomName> for String {
    fn from(name: RoomName) -> String {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_quadrants() {
        let w1n1: RoomName = "W1N1".parse().unwrap();
        assert_eq!((w1n1.col(), w1n1.row()), (-2, -2));

        let e0s0: RoomName = "E0S0".parse().unwrap();
        assert_eq!((e0s0.col(), e0s0.row()), (0, 0));

        let e12s3: RoomName = "E12S3".parse().unwrap();
        assert_eq!((e12s3.col(), e12s3.row()), (12, 3));

        let w0n0: RoomName = "W0N0".parse().unwrap();
        assert_eq!((w0n0.col(), w0n0.row()), (-1, -1));
    }

    #[test]
    fn display_round_trips() {
        for name in ["W1N1", "E0S0", "W12S7", "E999N999"] {
            let parsed: RoomName = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            "w5n8".parse::<RoomName>().unwrap(),
            "W5N8".parse::<RoomName>().unwrap()
        );
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", "W1", "1N1", "WN", "W1X1", "W1N1extra", "WfiveN1"] {
            assert_eq!(bad.parse::<RoomName>(), Err(RoomNameError::Malformed));
        }
    }

    #[test]
    fn rejects_out_of_world_indices() {
        assert_eq!(
            "E1000S0".parse::<RoomName>(),
            Err(RoomNameError::OutOfWorld)
        );
        assert!(RoomName::from_indices(1_000, 0).is_err());
        assert!(RoomName::from_indices(-1_001, 0).is_err());
    }

    #[test]
    fn neighbor_crosses_the_origin_seam() {
        let w0n0: RoomName = "W0N0".parse().unwrap();
        let east = w0n0.neighbor(Direction::Right).unwrap();
        assert_eq!(east.to_string(), "E0N0");
        let south_east = w0n0.neighbor(Direction::BottomRight).unwrap();
        assert_eq!(south_east.to_string(), "E0S0");
    }

    #[test]
    fn neighbor_stops_at_the_world_edge() {
        let edge: RoomName = "E999S0".parse().unwrap();
        assert_eq!(edge.neighbor(Direction::Right), None);
        assert!(edge.neighbor(Direction::Left).is_some());
    }
}
