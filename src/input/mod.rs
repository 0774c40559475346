//! Key bindings and per-frame input translation.
//!
//! The frame driver owns the input device and reports raw key edges; this module turns them into at most one
//! movement command per frame plus any other commands, in the order they were pressed.

use std::collections::HashMap;

use strum_macros::{AsRefStr, EnumIter};
use tracing::trace;

use crate::map::direction::Direction;

pub mod commands;

pub use commands::GameCommand;

/// Keys the engine knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    R,
    Q,
    Escape,
}

/// A key edge observed by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// The commands produced by one frame of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// The first direction pressed this frame, if any.
    pub movement: Option<Direction>,
    /// Non-movement commands, in press order.
    pub commands: Vec<GameCommand>,
}

impl FrameInput {
    /// Input for a frame where only a single direction was pressed.
    pub fn moving(direction: Direction) -> Self {
        Self {
            movement: Some(direction),
            commands: Vec::new(),
        }
    }

    pub fn command(command: GameCommand) -> Self {
        let mut input = Self::default();
        input.push(command);
        input
    }

    pub fn is_empty(&self) -> bool {
        self.movement.is_none() && self.commands.is_empty()
    }

    /// Records a command. Only the first movement of a frame is kept.
    pub fn push(&mut self, command: GameCommand) {
        match command {
            GameCommand::MovePlayer(direction) => {
                if self.movement.is_none() {
                    self.movement = Some(direction);
                } else {
                    trace!(ignored = direction.as_ref(), "Extra movement key this frame");
                }
            }
            other => self.commands.push(other),
        }
    }

    pub fn contains(&self, command: GameCommand) -> bool {
        match command {
            GameCommand::MovePlayer(direction) => self.movement == Some(direction),
            other => self.commands.contains(&other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<Key, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert(Key::Up, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(Key::W, GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert(Key::Down, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(Key::S, GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert(Key::Left, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(Key::A, GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert(Key::Right, GameCommand::MovePlayer(Direction::Right));
        key_bindings.insert(Key::D, GameCommand::MovePlayer(Direction::Right));

        // Game actions
        key_bindings.insert(Key::R, GameCommand::ResetLevel);
        key_bindings.insert(Key::Escape, GameCommand::Exit);
        key_bindings.insert(Key::Q, GameCommand::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn get(&self, key: Key) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }

    /// Rebinds `key`, returning the command it was bound to before.
    pub fn bind(&mut self, key: Key, command: GameCommand) -> Option<GameCommand> {
        self.key_bindings.insert(key, command)
    }

    pub fn unbind(&mut self, key: Key) -> Option<GameCommand> {
        self.key_bindings.remove(&key)
    }
}

/// Translates one frame's key edges into commands.
///
/// Only presses count; holding a key does not repeat the move, and releases are ignored.
pub fn process_key_events(bindings: &Bindings, events: &[KeyEvent]) -> FrameInput {
    let mut input = FrameInput::default();

    for event in events {
        if let KeyEvent::Pressed(key) = *event {
            if let Some(command) = bindings.get(key) {
                input.push(command);
            }
        }
    }

    input
}
