//! Runtime orchestration for the spatial query core.
//!
//! This crate wires the pure query/command types from `world-core` into a
//! synchronous host boundary: per-tick snapshot ingestion, query and command
//! passthroughs with `tracing` instrumentation, and durable flag-registry
//! persistence. Consumers embed [`WorldRuntime`] to drive ticks.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`repository`] provides flag persistence adapters
pub mod repository;
pub mod runtime;

mod error;

pub use error::{Result, RuntimeError};
pub use repository::{
    FileFlagRepository, FlagRepository, InMemoryFlagRepository, RepositoryError,
};
pub use runtime::{RuntimeBuilder, TickOutput, WorldRuntime};
