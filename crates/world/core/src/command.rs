//! Command result codes.
//!
//! Mutating operations (flag management, construction intents) never panic
//! and never surface internal errors: they report one of a fixed set of
//! codes the host understands. Queries, by contrast, use ordinary `Result`
//! types and `Option` for "no match".

use crate::error::{ErrorSeverity, WorldError};

/// Why a command was rejected. Success is the `Ok` arm of the surrounding
/// `Result`; every variant maps 1:1 onto a numeric wire code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    /// Target cell or object does not exist or is not visible.
    #[error("target is not valid or not visible")]
    InvalidTarget,

    /// Arguments were malformed (empty name, impossible spec).
    #[error("invalid command arguments")]
    InvalidArgs,

    /// The chosen flag name is already taken.
    #[error("a flag with this name already exists")]
    NameExists,

    /// A platform capacity limit was reached.
    #[error("capacity limit reached")]
    Full,

    /// The acting player does not control the target room.
    #[error("insufficient permission for this room")]
    InsufficientPermission,
}

impl CommandError {
    /// Numeric wire code reported to the host.
    pub const fn return_code(self) -> ReturnCode {
        match self {
            CommandError::InvalidTarget => ReturnCode::InvalidTarget,
            CommandError::InvalidArgs => ReturnCode::InvalidArgs,
            CommandError::NameExists => ReturnCode::NameExists,
            CommandError::Full => ReturnCode::Full,
            CommandError::InsufficientPermission => ReturnCode::InsufficientPermission,
        }
    }
}

impl WorldError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CommandError::InvalidArgs => ErrorSeverity::Validation,
            CommandError::InvalidTarget
            | CommandError::NameExists
            | CommandError::Full
            | CommandError::InsufficientPermission => ErrorSeverity::Recoverable,
        }
    }
}

/// Numeric result codes on the host wire (engine `OK`/`ERR_*` constants).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i8)]
pub enum ReturnCode {
    Ok = 0,
    InsufficientPermission = -1,
    NameExists = -3,
    InvalidTarget = -7,
    Full = -8,
    InvalidArgs = -10,
}

impl ReturnCode {
    /// Collapses a command result into its wire code.
    pub fn from_result<T>(result: &Result<T, CommandError>) -> ReturnCode {
        match result {
            Ok(_) => ReturnCode::Ok,
            Err(error) => error.return_code(),
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, ReturnCode::Ok)
    }
}

/// Shorthand for command outcomes; `#[must_use]` via `Result` forces callers
/// to check the code.
pub type CommandResult<T = ()> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_maps_to_its_wire_code() {
        assert_eq!(
            CommandError::NameExists.return_code() as i8,
            ReturnCode::NameExists as i8
        );
        assert_eq!(ReturnCode::Ok as i8, 0);
        assert_eq!(ReturnCode::InsufficientPermission as i8, -1);
        assert_eq!(ReturnCode::InvalidArgs as i8, -10);
    }

    #[test]
    fn from_result_collapses_ok_and_err() {
        assert_eq!(ReturnCode::from_result(&Ok(())), ReturnCode::Ok);
        assert!(ReturnCode::from_result(&Ok(())).is_ok());
        assert_eq!(
            ReturnCode::from_result::<()>(&Err(CommandError::Full)),
            ReturnCode::Full
        );
    }
}
