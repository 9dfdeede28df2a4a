//! Named marker flags and their registry.
//!
//! Flags are owned by a single player and live in an explicit
//! [`FlagRegistry`] passed to whoever needs them; there is no ambient global
//! flag table. All mutation goes through registry commands that report
//! [`CommandError`] codes.

use std::collections::BTreeMap;

use crate::command::{CommandError, CommandResult};
use crate::config::WorldConfig;
use crate::position::{Position, Positioned};
use crate::room::WorldSnapshot;

/// Flag palette. Wire values match the engine constants (1–10).
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
#[repr(u8)]
pub enum Color {
    Red = 1,
    Purple = 2,
    Blue = 3,
    Cyan = 4,
    Green = 5,
    Yellow = 6,
    Orange = 7,
    Brown = 8,
    Grey = 9,
    #[default]
    White = 10,
}

impl Color {
    /// Numeric engine constant for this color.
    pub const fn wire_value(self) -> u8 {
        self as u8
    }

    /// Parses a numeric engine constant back into a color.
    pub const fn from_wire(value: u8) -> Option<Color> {
        match value {
            1 => Some(Color::Red),
            2 => Some(Color::Purple),
            3 => Some(Color::Blue),
            4 => Some(Color::Cyan),
            5 => Some(Color::Green),
            6 => Some(Color::Yellow),
            7 => Some(Color::Orange),
            8 => Some(Color::Brown),
            9 => Some(Color::Grey),
            10 => Some(Color::White),
            _ => None,
        }
    }
}

/// A named marker on the map.
///
/// The name is the registry key and immutable for the flag's lifetime;
/// colors and position are mutated in place through registry commands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flag {
    name: String,
    color: Color,
    secondary_color: Color,
    position: Position,
}

impl Flag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn secondary_color(&self) -> Color {
        self.secondary_color
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

impl Positioned for Flag {
    fn pos(&self) -> Position {
        self.position
    }
}

/// Creation request for [`FlagRegistry::create_flag`].
///
/// Omitted fields take the engine defaults: white primary color, secondary
/// equal to primary, and a generated `FlagN` name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagSpec {
    position: Position,
    name: Option<String>,
    color: Option<Color>,
    secondary_color: Option<Color>,
}

impl FlagSpec {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            name: None,
            color: None,
            secondary_color: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn secondary_color(mut self, color: Color) -> Self {
        self.secondary_color = Some(color);
        self
    }
}

/// All flags owned by one player, keyed by name.
///
/// Bounded by [`WorldConfig::MAX_FLAGS`]; a removed flag frees its name for
/// reuse immediately.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagRegistry {
    flags: BTreeMap<String, Flag>,
    // Monotonic seed for generated names; skips over taken names.
    auto_name_counter: u64,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from previously stored flags, e.g. on host
    /// restore. Flags beyond the platform cap are dropped deterministically
    /// (BTreeMap name order).
    pub fn from_flags(flags: impl IntoIterator<Item = Flag>) -> Self {
        let mut registry = Self::new();
        for flag in flags {
            if registry.flags.len() >= WorldConfig::MAX_FLAGS {
                break;
            }
            registry.flags.insert(flag.name.clone(), flag);
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Creates a flag at the spec's position.
    ///
    /// Returns the flag's (possibly generated) name.
    ///
    /// Failure codes: `InvalidArgs` for an empty name, `NameExists` if the
    /// name is taken, `InvalidTarget` if the position is not in a visible
    /// room, `Full` at the platform flag cap.
    pub fn create_flag(&mut self, spec: FlagSpec, world: &WorldSnapshot) -> CommandResult<String> {
        if self.flags.len() >= WorldConfig::MAX_FLAGS {
            return Err(CommandError::Full);
        }
        if !world.contains(spec.position) {
            return Err(CommandError::InvalidTarget);
        }

        let name = match spec.name {
            Some(name) if name.is_empty() => return Err(CommandError::InvalidArgs),
            Some(name) if self.flags.contains_key(&name) => {
                return Err(CommandError::NameExists);
            }
            Some(name) => name,
            None => self.generate_name(),
        };

        let color = spec.color.unwrap_or_default();
        let secondary_color = spec.secondary_color.unwrap_or(color);
        self.flags.insert(
            name.clone(),
            Flag {
                name: name.clone(),
                color,
                secondary_color,
                position: spec.position,
            },
        );
        Ok(name)
    }

    /// Recolors a flag. A `None` secondary falls back to the primary color.
    pub fn set_color(
        &mut self,
        name: &str,
        color: Color,
        secondary_color: Option<Color>,
    ) -> CommandResult {
        let flag = self.flags.get_mut(name).ok_or(CommandError::InvalidTarget)?;
        flag.color = color;
        flag.secondary_color = secondary_color.unwrap_or(color);
        Ok(())
    }

    /// Moves a flag to a new position in a visible room.
    pub fn set_position(
        &mut self,
        name: &str,
        position: Position,
        world: &WorldSnapshot,
    ) -> CommandResult {
        if !world.contains(position) {
            return Err(CommandError::InvalidTarget);
        }
        let flag = self.flags.get_mut(name).ok_or(CommandError::InvalidTarget)?;
        flag.position = position;
        Ok(())
    }

    /// Removes a flag. Terminal: the name becomes reusable immediately.
    pub fn remove(&mut self, name: &str) -> CommandResult {
        self.flags
            .remove(name)
            .map(|_| ())
            .ok_or(CommandError::InvalidTarget)
    }

    fn generate_name(&mut self) -> String {
        loop {
            self.auto_name_counter += 1;
            let candidate = format!("Flag{}", self.auto_name_counter);
            if !self.flags.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}
