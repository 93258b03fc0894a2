//! Ordered entity registry owned by the world crate.

use dungeon_doors_core::{CellCoord, EntityId, EntityKind, EntitySnapshot, Level};

/// Entity description produced by the layout parser before ids are assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EntityRecord {
    pub(crate) kind: EntityKind,
    pub(crate) cell: CellCoord,
    pub(crate) level: Level,
}

#[derive(Clone, Debug)]
pub(crate) struct Entity {
    id: EntityId,
    kind: EntityKind,
    cell: CellCoord,
    level: Level,
    alive: bool,
}

impl Entity {
    pub(crate) fn kind(&self) -> EntityKind {
        self.kind
    }

    pub(crate) fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            level: self.level,
            alive: self.alive,
        }
    }
}

/// Entities sorted once by `(kind, level)`; index 0 is the player.
///
/// Entities are never removed. Identifiers equal registry indices so lookups
/// are direct.
#[derive(Clone, Debug, Default)]
pub(crate) struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    pub(crate) fn from_records(mut records: Vec<EntityRecord>) -> Self {
        records.sort_by_key(|record| (record.kind, record.level));
        let entities = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Entity {
                id: EntityId::new(u32::try_from(index).unwrap_or(u32::MAX)),
                kind: record.kind,
                cell: record.cell,
                level: record.level,
                alive: true,
            })
            .collect();
        Self { entities }
    }

    pub(crate) fn player(&self) -> Option<&Entity> {
        self.entities
            .first()
            .filter(|entity| entity.kind == EntityKind::Player)
    }

    /// Alive non-player entities in registry order.
    pub(crate) fn targets(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|entity| entity.alive && entity.kind != EntityKind::Player)
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&Entity> {
        let index = usize::try_from(id.get()).ok()?;
        self.entities.get(index)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = usize::try_from(id.get()).ok()?;
        self.entities.get_mut(index)
    }

    /// Relocates the entity, returning the room it left.
    pub(crate) fn move_entity(&mut self, id: EntityId, cell: CellCoord) -> Option<CellCoord> {
        let entity = self.get_mut(id)?;
        let from = entity.cell;
        entity.cell = cell;
        Some(from)
    }

    /// Updates the alive flag, returning the previous value.
    pub(crate) fn set_alive(&mut self, id: EntityId, alive: bool) -> Option<bool> {
        let entity = self.get_mut(id)?;
        let previous = entity.alive;
        entity.alive = alive;
        Some(previous)
    }

    /// Raises the entity's level by one, returning the new level.
    pub(crate) fn promote(&mut self, id: EntityId) -> Option<Level> {
        let entity = self.get_mut(id)?;
        entity.level = entity.level.promoted();
        Some(entity.level)
    }

    pub(crate) fn len(&self) -> usize {
        self.entities.len()
    }

    pub(crate) fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.entities.iter().map(Entity::snapshot).collect()
    }
}
