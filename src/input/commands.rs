use crate::map::direction::Direction;

/// Something the player asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    MovePlayer(Direction),
    ResetLevel,
    Exit,
}
