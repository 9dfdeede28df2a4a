//! Synchronous host-boundary orchestration.
//!
//! The host hands in one immutable [`WorldSnapshot`] per tick; every query
//! and command between `begin_tick` and `end_tick` runs against that view.
//! There is no background work and no suspension point: each call runs to
//! completion before returning, and the only budgets are the path-search
//! op/room caps.

use world_core::{
    Color, CommandResult, ConstructionIntent, ConstructionQueue, Flag, FlagRegistry, FlagSpec,
    LookItem, ObjectCategory, Path, PathOptions, Position, Positioned, RoomObject, SiteId,
    StructureKind, WorldConfig, WorldSnapshot, find_path,
};

use crate::error::{Result, RuntimeError};
use crate::repository::{FlagRepository, InMemoryFlagRepository};

/// Everything the host consumes at the end of a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutput {
    pub tick: u64,
    /// Construction intents queued this tick, in request order.
    pub construction: Vec<ConstructionIntent>,
    /// The full flag set after this tick's mutations, in name order.
    pub flags: Vec<Flag>,
}

/// Builder for [`WorldRuntime`] (validation happens at `build`).
pub struct RuntimeBuilder {
    config: WorldConfig,
    repository: Option<Box<dyn FlagRepository>>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: WorldConfig::default(),
            repository: None,
        }
    }

    /// Overrides the platform search defaults.
    pub fn with_config(mut self, config: WorldConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses the given repository for flag persistence. Defaults to an
    /// in-memory store.
    pub fn with_repository(mut self, repository: impl FlagRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Validates the configuration, restores the flag registry, and builds
    /// the runtime.
    pub fn build(self) -> Result<WorldRuntime> {
        let defaults = PathOptions::from_config(&self.config);
        defaults.validate().map_err(RuntimeError::Config)?;

        let repository = self
            .repository
            .unwrap_or_else(|| Box::new(InMemoryFlagRepository::new()));
        let flags = repository.load()?.unwrap_or_default();
        tracing::info!(flags = flags.len(), "world runtime initialized");

        Ok(WorldRuntime {
            defaults,
            world: WorldSnapshot::new(),
            flags,
            construction: ConstructionQueue::new(),
            repository,
            tick: 0,
        })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Synchronous facade over one player's view of the world.
///
/// Owns the flag registry and construction queue across ticks; the world
/// snapshot is replaced wholesale every [`begin_tick`](Self::begin_tick).
pub struct WorldRuntime {
    defaults: PathOptions,
    world: WorldSnapshot,
    flags: FlagRegistry,
    construction: ConstructionQueue,
    repository: Box<dyn FlagRepository>,
    tick: u64,
}

impl WorldRuntime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Installs the per-tick snapshot and advances the tick counter.
    pub fn begin_tick(&mut self, snapshot: WorldSnapshot) {
        self.tick += 1;
        tracing::debug!(
            tick = self.tick,
            rooms = snapshot.len(),
            "tick snapshot installed"
        );
        self.world = snapshot;
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn world(&self) -> &WorldSnapshot {
        &self.world
    }

    pub fn flags(&self) -> &FlagRegistry {
        &self.flags
    }

    /// Search defaults derived from the runtime configuration.
    pub fn search_defaults(&self) -> &PathOptions {
        &self.defaults
    }

    // ===== queries =====

    /// [`world_core::find_path`] with the runtime's default options.
    pub fn find_path(&self, from: Position, to: Position) -> Result<Path> {
        self.find_path_with(from, to, &self.defaults)
    }

    /// [`world_core::find_path`] with explicit options.
    pub fn find_path_with(
        &self,
        from: Position,
        to: Position,
        options: &PathOptions,
    ) -> Result<Path> {
        find_path(from, to, &self.world, options).map_err(RuntimeError::Config)
    }

    /// [`world_core::find_closest_by_path`] with the runtime's default
    /// options.
    pub fn find_closest_by_path<'a, T, I>(&self, origin: Position, candidates: I) -> Option<&'a T>
    where
        T: Positioned,
        I: IntoIterator<Item = &'a T>,
    {
        // Defaults were validated at build time.
        world_core::find_closest_by_path(origin, candidates, &self.world, &self.defaults)
            .unwrap_or_default()
    }

    pub fn look(&self, position: Position) -> Vec<LookItem<'_>> {
        self.world.look(position)
    }

    pub fn look_for(&self, position: Position, category: ObjectCategory) -> Vec<&RoomObject> {
        self.world.look_for(position, category)
    }

    // ===== commands =====

    /// Creates a flag; returns its (possibly generated) name.
    pub fn create_flag(&mut self, spec: FlagSpec) -> CommandResult<String> {
        let result = self.flags.create_flag(spec, &self.world);
        match &result {
            Ok(name) => tracing::debug!(tick = self.tick, flag = %name, "flag created"),
            Err(error) => tracing::warn!(
                tick = self.tick,
                code = ?error.return_code(),
                "flag creation rejected"
            ),
        }
        result
    }

    pub fn set_flag_color(
        &mut self,
        name: &str,
        color: Color,
        secondary_color: Option<Color>,
    ) -> CommandResult {
        let result = self.flags.set_color(name, color, secondary_color);
        self.log_command("set_flag_color", name, &result);
        result
    }

    pub fn set_flag_position(&mut self, name: &str, position: Position) -> CommandResult {
        let result = self.flags.set_position(name, position, &self.world);
        self.log_command("set_flag_position", name, &result);
        result
    }

    pub fn remove_flag(&mut self, name: &str) -> CommandResult {
        let result = self.flags.remove(name);
        self.log_command("remove_flag", name, &result);
        result
    }

    /// Queues a construction site for the host to materialize.
    pub fn create_construction_site(
        &mut self,
        position: Position,
        kind: StructureKind,
    ) -> CommandResult<SiteId> {
        let result = self
            .construction
            .create_construction_site(position, kind, &self.world);
        match &result {
            Ok(id) => tracing::debug!(tick = self.tick, site = %id, "construction site queued"),
            Err(error) => tracing::warn!(
                tick = self.tick,
                code = ?error.return_code(),
                "construction site rejected"
            ),
        }
        result
    }

    /// Persists the registry and drains this tick's outputs for the host.
    pub fn end_tick(&mut self) -> Result<TickOutput> {
        let construction = self.construction.drain();
        self.repository.store(&self.flags)?;
        tracing::debug!(
            tick = self.tick,
            intents = construction.len(),
            flags = self.flags.len(),
            "tick committed"
        );
        Ok(TickOutput {
            tick: self.tick,
            construction,
            flags: self.flags.iter().cloned().collect(),
        })
    }

    fn log_command<T>(&self, command: &'static str, name: &str, result: &CommandResult<T>) {
        match result {
            Ok(_) => tracing::debug!(tick = self.tick, flag = %name, command, "command applied"),
            Err(error) => tracing::warn!(
                tick = self.tick,
                flag = %name,
                command,
                code = ?error.return_code(),
                "command rejected"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_invalid_search_defaults() {
        let config = WorldConfig {
            max_rooms: 99,
            ..WorldConfig::default()
        };
        let result = RuntimeBuilder::new().with_config(config).build();
        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }

    #[test]
    fn builder_starts_with_an_empty_registry() {
        let runtime = RuntimeBuilder::new().build().unwrap();
        assert_eq!(runtime.tick(), 0);
        assert!(runtime.flags().is_empty());
    }
}
