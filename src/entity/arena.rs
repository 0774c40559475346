use crate::entity::{Entity, EntityId, EntityKind};

/// Owns every entity in a world and hands out handles to them.
///
/// Removed entities leave an empty slot behind, so a stale handle resolves to `None` instead of to whatever was
/// spawned afterwards.
#[derive(Debug, Default, Clone)]
pub struct EntityArena {
    slots: Vec<Option<Entity>>,
    live: usize,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unplaced entity and returns its handle.
    pub fn spawn(&mut self, kind: EntityKind) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(Entity::new(id, kind)));
        self.live += 1;
        id
    }

    /// Drops the entity behind `id`, returning it if it was alive.
    ///
    /// The caller is responsible for clearing any grid cell that still references it.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.slots.get_mut(id.index()).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().flatten()
    }

    /// Handles of every live entity of the given kind, in spawn order.
    pub fn ids_of(&self, kind: EntityKind) -> impl Iterator<Item = EntityId> + '_ {
        self.iter().filter(move |e| e.kind == kind).map(Entity::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_not_reused() {
        let mut arena = EntityArena::new();
        let a = arena.spawn(EntityKind::Crate);
        assert!(arena.despawn(a).is_some());

        let b = arena.spawn(EntityKind::Crate);
        assert_ne!(a, b);
        assert!(arena.get(a).is_none());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_despawn_twice() {
        let mut arena = EntityArena::new();
        let a = arena.spawn(EntityKind::Player);
        assert!(arena.despawn(a).is_some());
        assert!(arena.despawn(a).is_none());
        assert!(arena.is_empty());
    }
}
