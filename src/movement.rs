//! Push-chain movement resolution.
//!
//! A move runs in two passes. [`plan_move`] walks the cells in front of the mover without touching anything and
//! collects every entity that would be shoved; the chain is then relocated as a whole. A refused move therefore
//! never leaves partial state behind.

use glam::IVec2;
use smallvec::SmallVec;
use tracing::trace;

use crate::entity::{EntityArena, EntityId};
use crate::error::{BlockReason, GridError, MoveError};
use crate::grid::TileGrid;

/// Entities displaced by one move, mover first, farthest pushed entity last.
pub type PushChain = SmallVec<[EntityId; 8]>;

/// The result of a successful move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A zero delta was requested; nothing happened.
    Stationary,
    /// Every entity in `chain` moved by `delta`.
    Moved { chain: PushChain, delta: IVec2 },
}

impl MoveOutcome {
    /// How many entities were shoved by the mover.
    pub fn pushed(&self) -> usize {
        match self {
            MoveOutcome::Stationary => 0,
            MoveOutcome::Moved { chain, .. } => chain.len().saturating_sub(1),
        }
    }
}

/// Works out which entities a move of `id` by `delta` would displace.
///
/// Read-only. Succeeds with the full chain when the cell past its last member is free, walkable and inside the
/// grid. The mover only shoves an occupant if it is a pusher; a shoved entity in turn only shoves the next one if it
/// is a pusher itself, and every shoved entity must be pushable.
pub fn plan_move(grid: &TileGrid, entities: &EntityArena, id: EntityId, delta: IVec2) -> Result<PushChain, MoveError> {
    let mover = entities.get(id).ok_or(MoveError::UnknownEntity(id))?;
    if !mover.is_placed() {
        return Err(MoveError::NotPlaced(id));
    }

    let mut chain = PushChain::new();
    chain.push(id);

    let limit = grid.max_dimension();
    let mut tail = mover;
    loop {
        let next = tail.position() + delta;

        if !grid.in_bounds(next) {
            return Err(MoveError::Blocked(BlockReason::Boundary));
        }
        let tile = grid.tile_at(next)?;
        if !tile.terrain.is_walkable() {
            return Err(MoveError::Blocked(BlockReason::Wall));
        }

        let Some(occupant) = tile.occupant else {
            return Ok(chain);
        };

        if !tail.is_pusher() {
            return Err(MoveError::Blocked(BlockReason::NotPusher));
        }
        let other = entities.get(occupant).ok_or(MoveError::UnknownEntity(occupant))?;
        if !other.is_pushable() {
            return Err(MoveError::Blocked(BlockReason::Immovable));
        }

        // Only a corrupted grid can make the chain revisit an entity or outgrow the grid itself.
        if chain.contains(&occupant) || chain.len() >= limit {
            return Err(MoveError::ChainTooLong(chain.len()));
        }

        chain.push(occupant);
        tail = other;
    }
}

/// Relocates every member of a planned chain by `delta`, farthest first.
///
/// The chain is checked against the grid before anything moves: each member must stand on the cell it records, and
/// each destination must hold the next member of the chain, or nothing for the last one.
fn commit(grid: &mut TileGrid, entities: &mut EntityArena, chain: &[EntityId], delta: IVec2) -> Result<(), MoveError> {
    let mut origins: SmallVec<[IVec2; 8]> = SmallVec::with_capacity(chain.len());

    for (i, &id) in chain.iter().enumerate() {
        let entity = entities.get(id).ok_or(MoveError::UnknownEntity(id))?;
        let from = entity.position();
        if !entity.is_placed() || grid.cell_at(from)? != Some(id) {
            return Err(GridError::Inconsistent(format!("chain member {id} is not standing on {from}")).into());
        }

        let to = from + delta;
        let occupant = grid.cell_at(to)?;
        if occupant != chain.get(i + 1).copied() {
            return Err(match occupant {
                Some(occupant) => GridError::CellOccupied {
                    x: to.x,
                    y: to.y,
                    occupant,
                },
                None => GridError::Inconsistent(format!("push chain is broken at {to}")),
            }
            .into());
        }

        origins.push(from);
    }

    for (&id, &from) in chain.iter().zip(&origins).rev() {
        grid.move_occupant(from, from + delta)?;
        let entity = entities.get_mut(id).ok_or(MoveError::UnknownEntity(id))?;
        entity.position = from + delta;
    }
    Ok(())
}

/// Attempts to move `id` by `delta`, pushing whatever stands in the way.
///
/// Either the whole chain moves or nothing does.
pub fn try_move(grid: &mut TileGrid, entities: &mut EntityArena, id: EntityId, delta: IVec2) -> Result<MoveOutcome, MoveError> {
    if delta == IVec2::ZERO {
        return Ok(MoveOutcome::Stationary);
    }

    let chain = match plan_move(grid, entities, id, delta) {
        Ok(chain) => chain,
        Err(error) => {
            trace!(entity = %id, ?delta, %error, "Move refused");
            return Err(error);
        }
    };

    commit(grid, entities, &chain, delta)?;
    trace!(entity = %id, ?delta, pushed = chain.len() - 1, "Move committed");

    debug_assert!(
        grid.check_consistency(entities).is_ok(),
        "grid inconsistent after committing {chain:?}"
    );

    Ok(MoveOutcome::Moved { chain, delta })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;

    fn crates_at(width: usize, cells: &[IVec2]) -> (TileGrid, EntityArena, Vec<EntityId>) {
        let mut grid = TileGrid::new(width, 1).unwrap();
        let mut arena = EntityArena::new();
        let ids = cells
            .iter()
            .map(|&pos| {
                let id = arena.spawn(EntityKind::Crate);
                grid.place(arena.get_mut(id).unwrap(), pos).unwrap();
                id
            })
            .collect();
        (grid, arena, ids)
    }

    #[test]
    fn test_commit_refuses_to_overwrite_an_occupant() {
        let (mut grid, mut arena, ids) = crates_at(3, &[IVec2::new(0, 0), IVec2::new(1, 0)]);

        let result = commit(&mut grid, &mut arena, &ids[..1], IVec2::X);

        assert_eq!(
            result,
            Err(MoveError::Grid(GridError::CellOccupied {
                x: 1,
                y: 0,
                occupant: ids[1]
            }))
        );
        assert!(!result.unwrap_err().is_blocked());
        assert_eq!(grid.cell_at(IVec2::new(0, 0)), Ok(Some(ids[0])));
        grid.check_consistency(&arena).unwrap();
    }

    #[test]
    fn test_commit_leaves_nothing_moved_on_failure() {
        // The first member would leave the grid; the second is not even adjacent to it.
        let (mut grid, mut arena, ids) = crates_at(3, &[IVec2::new(2, 0), IVec2::new(0, 0)]);

        let result = commit(&mut grid, &mut arena, &ids, IVec2::X);

        assert_eq!(result, Err(MoveError::Grid(GridError::OutOfBounds { x: 3, y: 0 })));
        assert_eq!(arena.get(ids[1]).unwrap().position(), IVec2::ZERO);
        assert_eq!(grid.cell_at(IVec2::new(1, 0)), Ok(None));
        grid.check_consistency(&arena).unwrap();
    }

    #[test]
    fn test_commit_rejects_a_gap_in_the_chain() {
        let (mut grid, mut arena, ids) = crates_at(4, &[IVec2::new(0, 0), IVec2::new(2, 0)]);

        let result = commit(&mut grid, &mut arena, &ids, IVec2::X);

        assert!(matches!(result, Err(MoveError::Grid(GridError::Inconsistent(_)))));
        grid.check_consistency(&arena).unwrap();
    }

    #[test]
    fn test_commit_moves_a_valid_chain() {
        let (mut grid, mut arena, ids) = crates_at(3, &[IVec2::new(0, 0), IVec2::new(1, 0)]);

        commit(&mut grid, &mut arena, &ids, IVec2::X).unwrap();

        assert_eq!(grid.cell_at(IVec2::new(0, 0)), Ok(None));
        assert_eq!(grid.cell_at(IVec2::new(1, 0)), Ok(Some(ids[0])));
        assert_eq!(grid.cell_at(IVec2::new(2, 0)), Ok(Some(ids[1])));
        grid.check_consistency(&arena).unwrap();
    }
}
