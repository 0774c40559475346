//! Fixed-size occupancy grid.
//!
//! Cells store terrain plus an optional handle to the entity standing on them. The grid never owns entities; it only
//! mirrors their logical positions, and keeping both sides in agreement is the job of this module and the movement
//! resolver.

use std::collections::HashMap;

use glam::IVec2;

use crate::constants::{MapTile, MAX_GRID_CELLS};
use crate::entity::{Entity, EntityArena, EntityId};
use crate::error::GridError;

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub terrain: MapTile,
    pub occupant: Option<EntityId>,
}

impl Tile {
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct TileGrid {
    width: usize,
    height: usize,
    /// Row-major, `y * width + x`.
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates an all-floor grid with no occupants.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let len = Self::cell_count(width, height)?;
        Self::with_terrain(width, height, vec![MapTile::Floor; len])
    }

    /// Creates a grid from row-major terrain. `terrain` must hold exactly `width * height` tiles.
    pub fn with_terrain(width: usize, height: usize, terrain: Vec<MapTile>) -> Result<Self, GridError> {
        let len = Self::cell_count(width, height)?;
        if terrain.len() != len {
            return Err(GridError::Inconsistent(format!(
                "expected {len} terrain tiles for a {width}x{height} grid, got {}",
                terrain.len()
            )));
        }

        let tiles = terrain
            .into_iter()
            .map(|terrain| Tile { terrain, occupant: None })
            .collect();

        Ok(Self { width, height, tiles })
    }

    /// Number of cells in a `width` x `height` grid, if those dimensions are allowed.
    fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
        let fits_axis = |n: usize| n > 0 && i32::try_from(n).is_ok();
        width
            .checked_mul(height)
            .filter(|&len| fits_axis(width) && fits_axis(height) && len <= MAX_GRID_CELLS)
            .ok_or(GridError::InvalidDimensions { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The longest axis, which also bounds the length of any push chain.
    pub fn max_dimension(&self) -> usize {
        self.width.max(self.height)
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: IVec2) -> Result<usize, GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds { x: pos.x, y: pos.y });
        }
        Ok(pos.y as usize * self.width + pos.x as usize)
    }

    fn position_of(&self, index: usize) -> IVec2 {
        IVec2::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn tile_at(&self, pos: IVec2) -> Result<&Tile, GridError> {
        let index = self.index(pos)?;
        Ok(&self.tiles[index])
    }

    pub fn terrain_at(&self, pos: IVec2) -> Result<MapTile, GridError> {
        self.tile_at(pos).map(|tile| tile.terrain)
    }

    /// Returns the handle of whatever occupies `pos`, if anything.
    pub fn cell_at(&self, pos: IVec2) -> Result<Option<EntityId>, GridError> {
        self.tile_at(pos).map(|tile| tile.occupant)
    }

    /// Registers `entity` at `pos` and sets its logical position.
    ///
    /// The entity's visual position snaps to the new cell; placement is a teleport, not a move. Placing an entity
    /// where it already stands is accepted. An entity that is placed elsewhere is lifted off its old cell first.
    pub fn place(&mut self, entity: &mut Entity, pos: IVec2) -> Result<(), GridError> {
        let index = self.index(pos)?;
        let tile = self.tiles[index];

        if !tile.terrain.is_walkable() {
            return Err(GridError::WallPlacement { x: pos.x, y: pos.y });
        }
        match tile.occupant {
            Some(occupant) if occupant != entity.id() => {
                return Err(GridError::CellOccupied {
                    x: pos.x,
                    y: pos.y,
                    occupant,
                });
            }
            _ => {}
        }

        if entity.placed && entity.position != pos {
            let old = self.index(entity.position)?;
            if self.tiles[old].occupant == Some(entity.id()) {
                self.tiles[old].occupant = None;
            }
        }

        self.tiles[index].occupant = Some(entity.id());
        entity.position = pos;
        entity.placed = true;
        entity.snap_visual();
        Ok(())
    }

    /// Removes any occupant reference at `pos`. Clearing an empty cell does nothing.
    pub fn clear(&mut self, pos: IVec2) -> Result<Option<EntityId>, GridError> {
        let index = self.index(pos)?;
        Ok(self.tiles[index].occupant.take())
    }

    /// Moves the reference at `from` onto `to`, overwriting whatever `to` held.
    ///
    /// Performs no collision checks; the movement resolver validates every relocation before calling this.
    pub(crate) fn move_occupant(&mut self, from: IVec2, to: IVec2) -> Result<(), GridError> {
        let from = self.index(from)?;
        let to = self.index(to)?;
        let occupant = self.tiles[from].occupant.take();
        self.tiles[to].occupant = occupant;
        Ok(())
    }

    /// Iterates over every cell with its coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (self.position_of(index), tile))
    }

    /// Number of cells holding an occupant.
    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.occupant.is_some()).count()
    }

    /// Which of the two checkerboard shades a renderer should use for the cell background.
    pub fn is_checker_dark(pos: IVec2) -> bool {
        (pos.x - pos.y).rem_euclid(2) == 0
    }

    /// Verifies that cells and entities agree about who stands where.
    pub fn check_consistency(&self, entities: &EntityArena) -> Result<(), GridError> {
        let mut seen: HashMap<EntityId, IVec2> = HashMap::new();

        for (pos, tile) in self.iter() {
            let Some(id) = tile.occupant else { continue };

            if let Some(first) = seen.insert(id, pos) {
                return Err(GridError::Inconsistent(format!(
                    "entity {id} is referenced by both {first} and {pos}"
                )));
            }
            let entity = entities
                .get(id)
                .ok_or_else(|| GridError::Inconsistent(format!("cell {pos} references missing entity {id}")))?;
            if !entity.placed || entity.position != pos {
                return Err(GridError::Inconsistent(format!(
                    "cell {pos} references entity {id}, which records {} (placed: {})",
                    entity.position, entity.placed
                )));
            }
            if !tile.terrain.is_walkable() {
                return Err(GridError::Inconsistent(format!("entity {id} stands inside a wall at {pos}")));
            }
        }

        if let Some(stray) = entities.iter().find(|e| e.placed && !seen.contains_key(&e.id())) {
            return Err(GridError::Inconsistent(format!(
                "entity {} claims {} but no cell references it",
                stray.id(),
                stray.position
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_row_major() {
        let grid = TileGrid::new(4, 3).unwrap();
        assert_eq!(grid.index(IVec2::new(1, 2)).unwrap(), 9);
        assert_eq!(grid.position_of(9), IVec2::new(1, 2));
    }

    #[test]
    fn test_checker_handles_negative_differences() {
        assert!(TileGrid::is_checker_dark(IVec2::new(0, 0)));
        assert!(!TileGrid::is_checker_dark(IVec2::new(0, 1)));
        assert!(TileGrid::is_checker_dark(IVec2::new(1, 3)));
    }
}
