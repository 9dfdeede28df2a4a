use world_core::PathOptionsError;

use crate::repository::RepositoryError;

/// Errors surfaced by the runtime shell.
///
/// Command rejections are not errors: they flow back to callers as
/// [`world_core::CommandError`] codes. This type covers the runtime's own
/// failures only.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Configured search defaults failed validation.
    #[error("invalid search defaults: {0}")]
    Config(#[from] PathOptionsError),

    /// Flag repository operation failed.
    #[error("flag repository failure: {0}")]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
