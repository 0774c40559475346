//! This module contains all the constants used by the engine.

use std::time::Duration;

use strum_macros::AsRefStr;

/// Fixed timestep used by the headless frame driver.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each cell, in pixels. Renderers multiply visual positions by this.
pub const CELL_SIZE: u32 = 16;

/// Largest number of cells a grid may have.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// How quickly visual positions chase logical positions, per second.
pub const DEFAULT_INTERPOLATION_RATE: f32 = 30.0;

/// Below this distance a visual coordinate snaps onto its logical coordinate.
pub const VISUAL_SNAP_EPSILON: f32 = 0.00001;

/// Frames the driver keeps running after the last scripted input so visuals can settle.
pub const DEFAULT_SETTLE_FRAMES: u32 = 30;

/// Static terrain of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MapTile {
    /// Walkable ground.
    #[default]
    Floor,
    /// Impassable; nothing may stand or be pushed here.
    Wall,
    /// A target cell for crates.
    Goal,
    /// The level exit. Walkable.
    Door,
}

impl MapTile {
    /// Whether entities may occupy a tile with this terrain.
    pub const fn is_walkable(self) -> bool {
        !matches!(self, MapTile::Wall)
    }
}

/// The default level layout: a 12x6 room with a player, two crates and two goals.
pub const RAW_LEVEL: [&str; 6] = [
    "############",
    "#..........#",
    "#@c......o.#",
    "#..c.....o.#",
    "#..........#",
    "##########D#",
];
