//! Simulation state and the per-frame entry point.
//!
//! A [`World`] owns the grid, the entity arena and the frame clock. A frame driver calls [`World::update`] once per
//! frame with the elapsed time and that frame's input, then draws from [`World::entities`] (visual positions) and
//! [`World::grid`] (terrain and occupancy).

use std::fs;

use glam::IVec2;
use tracing::{debug, error, info, trace, warn};

use crate::config::EngineConfig;
use crate::constants::{MapTile, RAW_LEVEL};
use crate::entity::{Entity, EntityArena, EntityId, EntityKind};
use crate::error::{GameResult, GridError, MoveError, ParseError};
use crate::formatter;
use crate::grid::TileGrid;
use crate::input::{FrameInput, GameCommand};
use crate::interpolation::{self, InterpolationMode};
use crate::map::direction::Direction;
use crate::map::parser::{LevelParser, ParsedLevel};
use crate::movement::{self, MoveOutcome};

/// Frame timing, advanced by every [`World::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameClock {
    /// Seconds covered by the most recent frame.
    pub delta: f32,
    /// Seconds simulated since the level was loaded.
    pub elapsed: f32,
    /// Frames simulated since the level was loaded.
    pub frame: u64,
}

impl GameClock {
    fn tick(&mut self, delta: f32) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame += 1;
    }
}

/// What happened during one call to [`World::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// The outcome of this frame's movement request, if there was one.
    pub movement: Option<Result<MoveOutcome, MoveError>>,
    /// The level was reloaded this frame.
    pub reset: bool,
    /// The player asked to quit; the driver decides what to do about it.
    pub exit_requested: bool,
    /// Every goal is covered by a crate.
    pub solved: bool,
}

impl FrameReport {
    /// Whether the player moved this frame.
    pub fn moved(&self) -> bool {
        matches!(self.movement, Some(Ok(MoveOutcome::Moved { .. })))
    }

    /// Whether this frame's move bumped into something.
    pub fn blocked(&self) -> bool {
        matches!(&self.movement, Some(Err(e)) if e.is_blocked())
    }
}

pub struct World {
    grid: TileGrid,
    entities: EntityArena,
    player: EntityId,
    level: ParsedLevel,
    clock: GameClock,
    interpolation_rate: f32,
    interpolation_mode: InterpolationMode,
}

impl World {
    /// Builds a world from a parsed level using the configured interpolation settings.
    pub fn load(level: ParsedLevel, config: &EngineConfig) -> GameResult<Self> {
        let (grid, entities, player) = Self::build(&level)?;

        debug!(
            width = level.width,
            height = level.height,
            entities = entities.len(),
            "Level loaded"
        );

        Ok(Self {
            grid,
            entities,
            player,
            level,
            clock: GameClock::default(),
            interpolation_rate: config.interpolation_rate,
            interpolation_mode: config.interpolation_mode(),
        })
    }

    /// Builds a world from the configured level file, or from the built-in level when none is configured.
    pub fn from_config(config: &EngineConfig) -> GameResult<Self> {
        let level = match &config.level_path {
            Some(path) => {
                info!(path = %path.display(), "Loading level file");
                LevelParser::parse_str(&fs::read_to_string(path)?)?
            }
            None => LevelParser::parse_level(&RAW_LEVEL)?,
        };
        Self::load(level, config)
    }

    fn build(level: &ParsedLevel) -> GameResult<(TileGrid, EntityArena, EntityId)> {
        let mut grid = TileGrid::with_terrain(level.width, level.height, level.tiles.clone())?;
        let mut entities = EntityArena::new();
        let mut player = None;

        for placement in &level.placements {
            let id = entities.spawn(placement.kind);
            let entity = entities.get_mut(id).ok_or(MoveError::UnknownEntity(id))?;
            grid.place(entity, placement.position)?;

            if placement.kind == EntityKind::Player && player.is_none() {
                player = Some(id);
            }
        }

        let player = player.ok_or(ParseError::InvalidPlayerCount(0))?;
        grid.check_consistency(&entities)?;
        Ok((grid, entities, player))
    }

    /// Reloads the current level, discarding all progress.
    pub fn reset(&mut self) -> GameResult<()> {
        let (grid, entities, player) = Self::build(&self.level)?;
        self.grid = grid;
        self.entities = entities;
        self.player = player;
        self.clock = GameClock::default();
        debug!("Level reset");
        Ok(())
    }

    /// Runs one frame: applies input, resolves the player's move, then eases every visual position.
    pub fn update(&mut self, elapsed: f32, input: &FrameInput) -> FrameReport {
        let elapsed = elapsed.max(0.0);
        self.clock.tick(elapsed);
        formatter::increment_frame();

        let mut report = FrameReport::default();

        for command in &input.commands {
            match command {
                GameCommand::ResetLevel => match self.reset() {
                    Ok(()) => report.reset = true,
                    Err(e) => error!("Failed to reset level: {e}"),
                },
                GameCommand::Exit => report.exit_requested = true,
                GameCommand::MovePlayer(_) => {}
            }
        }

        if let Some(direction) = input.movement {
            let result = self.try_move(self.player, direction);
            if let Err(e) = &result {
                if !e.is_blocked() {
                    error!("Player move violated a grid contract: {e}");
                    debug_assert!(false, "player move failed: {e}");
                }
            }
            report.movement = Some(result);
        }

        self.advance_visuals(elapsed);

        report.solved = self.is_solved();
        report
    }

    /// Eases every entity's visual position toward its cell.
    pub fn advance_visuals(&mut self, elapsed: f32) {
        let (rate, mode) = (self.interpolation_rate, self.interpolation_mode);
        for entity in self.entities.iter_mut() {
            interpolation::advance(entity, elapsed, rate, mode);
        }
    }

    /// Moves an entity one cell in `direction`, pushing anything in the way.
    pub fn try_move(&mut self, id: EntityId, direction: Direction) -> Result<MoveOutcome, MoveError> {
        self.try_move_by(id, direction.as_ivec2())
    }

    /// Moves an entity by an arbitrary delta, pushing anything in the way.
    pub fn try_move_by(&mut self, id: EntityId, delta: IVec2) -> Result<MoveOutcome, MoveError> {
        movement::try_move(&mut self.grid, &mut self.entities, id, delta)
    }

    /// Spawns a new entity directly onto `pos`.
    pub fn place(&mut self, kind: EntityKind, pos: IVec2) -> Result<EntityId, GridError> {
        let id = self.entities.spawn(kind);
        let placed = match self.entities.get_mut(id) {
            Some(entity) => self.grid.place(entity, pos),
            None => Err(GridError::Inconsistent(format!("freshly spawned entity {id} is missing"))),
        };

        if let Err(e) = placed {
            self.entities.despawn(id);
            warn!("Could not place {} at {pos}: {e}", kind.as_ref());
            return Err(e);
        }

        trace!(entity = %id, kind = kind.as_ref(), %pos, "Entity placed");
        Ok(id)
    }

    /// Removes an entity from the grid and the world. The player cannot be removed.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        if id == self.player {
            warn!("Refusing to remove the player");
            return None;
        }

        let entity = self.entities.get(id)?;
        if entity.is_placed() {
            let pos = entity.position();
            if let Err(e) = self.grid.clear(pos) {
                error!("Failed to clear cell of removed entity {id}: {e}");
            }
        }
        self.entities.despawn(id)
    }

    /// Whether every goal is covered by a crate. A level without goals is never solved.
    pub fn is_solved(&self) -> bool {
        let mut goals = self
            .grid
            .iter()
            .filter(|(_, tile)| tile.terrain == MapTile::Goal)
            .peekable();
        if goals.peek().is_none() {
            return false;
        }

        goals.all(|(_, tile)| {
            tile.occupant
                .and_then(|id| self.entities.get(id))
                .is_some_and(|entity| entity.kind == EntityKind::Crate)
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn entities(&self) -> &EntityArena {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Handle of the active pusher.
    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn clock(&self) -> GameClock {
        self.clock
    }

    pub fn level(&self) -> &ParsedLevel {
        &self.level
    }

    pub fn interpolation_mode(&self) -> InterpolationMode {
        self.interpolation_mode
    }

    /// Whether every visual position has caught up with its cell.
    pub fn is_settled(&self) -> bool {
        self.entities.iter().all(interpolation::is_settled)
    }
}
