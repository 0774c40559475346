#![allow(dead_code)]

use glam::IVec2;
use pushgrid::{
    config::EngineConfig,
    entity::{EntityArena, EntityFlags, EntityId, EntityKind},
    grid::TileGrid,
    map::parser::LevelParser,
    world::World,
};

/// Loads a world from an inline layout with the default configuration.
pub fn world_from(rows: &[&str]) -> World {
    world_with(rows, &EngineConfig::default())
}

pub fn world_with(rows: &[&str], config: &EngineConfig) -> World {
    let level = LevelParser::parse_level(rows).expect("test layout should parse");
    World::load(level, config).expect("test layout should load")
}

/// Handle of the entity standing at `pos`, panicking if the cell is empty.
pub fn occupant(world: &World, x: i32, y: i32) -> EntityId {
    world
        .grid()
        .cell_at(IVec2::new(x, y))
        .unwrap()
        .unwrap_or_else(|| panic!("expected an occupant at ({x}, {y})"))
}

pub fn position_of(world: &World, id: EntityId) -> IVec2 {
    world.entity(id).expect("entity should exist").position()
}

pub fn assert_consistent(world: &World) {
    world.grid().check_consistency(world.entities()).expect("grid should be consistent");
}

/// A bare floor grid with entities of the given flags placed at the given cells.
pub fn row_with(width: usize, height: usize, placements: &[(EntityKind, EntityFlags, IVec2)]) -> (TileGrid, EntityArena, Vec<EntityId>) {
    let mut grid = TileGrid::new(width, height).unwrap();
    let mut arena = EntityArena::new();
    let mut ids = Vec::new();

    for &(kind, flags, pos) in placements {
        let id = arena.spawn(kind);
        let entity = arena.get_mut(id).unwrap();
        entity.flags = flags;
        grid.place(entity, pos).unwrap();
        ids.push(id);
    }

    (grid, arena, ids)
}
