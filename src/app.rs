//! Headless frame driver.
//!
//! Replays a move script against a [`World`] at a fixed timestep: one scripted key press per frame, followed by a
//! few idle frames so visual positions can settle.

use anyhow::{anyhow, Result};
use tracing::{debug, info, info_span};

use crate::config::EngineConfig;
use crate::constants::LOOP_TIME;
use crate::input::{process_key_events, Bindings, Key, KeyEvent};
use crate::map::render::render_ascii;
use crate::world::World;

/// Converts a script character into the key it stands for.
///
/// `U`, `D`, `L` and `R` (case-insensitive) move the player; `Z` resets the level and `Q` quits. Whitespace is
/// skipped.
pub fn script_key(c: char) -> Result<Option<Key>> {
    let key = match c.to_ascii_uppercase() {
        c if c.is_whitespace() => return Ok(None),
        'U' => Key::Up,
        'D' => Key::Down,
        'L' => Key::Left,
        'R' => Key::Right,
        'Z' => Key::R,
        'Q' => Key::Escape,
        other => return Err(anyhow!("Unknown script character {other:?}")),
    };
    Ok(Some(key))
}

/// Parses a whole script into one key press per frame.
pub fn parse_script(script: &str) -> Result<Vec<Key>> {
    script
        .chars()
        .filter_map(|c| script_key(c).transpose())
        .collect()
}

/// The state of a run after the driver stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames simulated by this run, including any before a level reset.
    pub frames: u64,
    pub moves: usize,
    pub blocked: usize,
    pub solved: bool,
    pub exited: bool,
    pub board: String,
}

pub struct App {
    world: World,
    bindings: Bindings,
    settle_frames: u32,
}

impl App {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let world = World::from_config(config)?;
        Ok(Self {
            world,
            bindings: Bindings::default(),
            settle_frames: config.settle_frames,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Feeds `keys` to the world one per frame, then idles for the configured number of settle frames.
    pub fn run(&mut self, keys: &[Key]) -> RunSummary {
        let _span = info_span!("run", keys = keys.len()).entered();
        let dt = LOOP_TIME.as_secs_f32();

        let (mut frames, mut moves, mut blocked, mut exited) = (0, 0, 0, false);
        let mut solved = self.world.is_solved();

        for &key in keys {
            let input = process_key_events(&self.bindings, &[KeyEvent::Pressed(key), KeyEvent::Released(key)]);
            let report = self.world.update(dt, &input);
            frames += 1;

            if report.moved() {
                moves += 1;
            }
            if report.blocked() {
                blocked += 1;
            }
            if report.exit_requested {
                info!("Exit requested. Stopping...");
                exited = true;
                break;
            }
            if report.solved && !solved {
                info!(frame = frames, "Puzzle solved");
            }
            solved = report.solved;
        }

        for _ in 0..self.settle_frames {
            if self.world.is_settled() {
                break;
            }
            self.world.update(dt, &Default::default());
            frames += 1;
        }
        debug!(settled = self.world.is_settled(), "Run finished");

        RunSummary {
            frames,
            moves,
            blocked,
            solved: self.world.is_solved(),
            exited,
            board: render_ascii(&self.world),
        }
    }
}
