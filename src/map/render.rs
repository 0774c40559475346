//! Text rendering of a world, using the same alphabet the level parser reads.

use crate::constants::MapTile;
use crate::entity::EntityKind;
use crate::grid::Tile;
use crate::world::World;

/// Returns the layout character for a single cell.
///
/// Goals keep their own glyphs when occupied (`+`, `*`). Doors do not: an entity standing in a doorway is drawn
/// as a plain `@` or `c`, and the `D` shows again once the cell is empty.
pub fn tile_char(tile: &Tile, occupant: Option<EntityKind>) -> char {
    match (tile.terrain, occupant) {
        (MapTile::Goal, Some(EntityKind::Player)) => '+',
        (MapTile::Goal, Some(EntityKind::Crate)) => '*',
        (_, Some(EntityKind::Player)) => '@',
        (_, Some(EntityKind::Crate)) => 'c',
        (MapTile::Wall, None) => '#',
        (MapTile::Floor, None) => '.',
        (MapTile::Goal, None) => 'o',
        (MapTile::Door, None) => 'D',
    }
}

/// Renders the logical state of `world`, one line per row, each line terminated by a newline.
///
/// The output of a freshly loaded level parses back into the same level, as long as nobody stands on a door.
pub fn render_ascii(world: &World) -> String {
    let grid = world.grid();
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());

    for (pos, tile) in grid.iter() {
        let occupant = tile.occupant.and_then(|id| world.entity(id)).map(|e| e.kind);
        out.push(tile_char(tile, occupant));
        if pos.x as usize == grid.width() - 1 {
            out.push('\n');
        }
    }

    out
}
