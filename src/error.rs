//! Centralized error types for the engine.
//!
//! `MoveError::Blocked` is the only error expected during normal play; everything else
//! points at a broken contract between the engine and its caller.

use std::io;

use strum_macros::AsRefStr;

use crate::entity::EntityId;

/// Main error type for the engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Movement error: {0}")]
    Move(#[from] MoveError),

    #[error("Level parsing error: {0}")]
    LevelParse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by direct grid access.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Cell ({x}, {y}) is already occupied by entity {occupant}")]
    CellOccupied { x: i32, y: i32, occupant: EntityId },

    #[error("Cell ({x}, {y}) is a wall")]
    WallPlacement { x: i32, y: i32 },

    #[error("Grid dimensions must be non-zero and at most {} cells, got {width}x{height}", crate::constants::MAX_GRID_CELLS)]
    InvalidDimensions { width: usize, height: usize },

    #[error("Grid and entities disagree: {0}")]
    Inconsistent(String),
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BlockReason {
    /// The chain would leave the grid.
    Boundary,
    /// The chain runs into wall terrain.
    Wall,
    /// The entity at the head of the chain cannot push what is in front of it.
    NotPusher,
    /// The occupant in the way can never be displaced.
    Immovable,
}

/// Errors raised by the movement resolver.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Move blocked: {}", .0.as_ref())]
    Blocked(BlockReason),

    #[error("Entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("Entity {0} is not placed on the grid")]
    NotPlaced(EntityId),

    #[error("Push chain exceeded {0} entities")]
    ChainTooLong(usize),

    #[error("Grid contract violated during move: {0}")]
    Grid(#[from] GridError),
}

impl MoveError {
    /// Returns true for the routine outcome of bumping into something.
    pub fn is_blocked(&self) -> bool {
        matches!(self, MoveError::Blocked(_))
    }
}

/// Error type for level parsing operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in level: {0:?}")]
    UnknownCharacter(char),

    #[error("Level has no rows")]
    EmptyLevel,

    #[error("Row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Level must have exactly one player, found {0}")]
    InvalidPlayerCount(usize),
}

/// Errors raised while loading engine configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Extract(Box::new(error))
    }
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
