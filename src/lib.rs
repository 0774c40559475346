//! Tile-grid occupancy and push-chain movement engine.

pub mod app;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod formatter;
pub mod grid;
pub mod input;
pub mod interpolation;
pub mod map;
pub mod movement;
pub mod world;
