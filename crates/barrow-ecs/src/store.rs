//! Type-erased component storage keyed by (kind, entity).
//!
//! One lazily-created map per [`ComponentKind`]. Lookups on entities that
//! were never given a component (or were destroyed) return `None`; nothing
//! in here panics or errors. Scans return a snapshot copied at call time so
//! a system may freely remove components (or whole entities) while walking
//! the very list it asked for.

use std::collections::HashMap;

use crate::component::{Component, ComponentKind, ComponentRecord};
use crate::entity::Entity;

/// Per-kind entity-to-value maps. Owns all component data in a world.
#[derive(Debug, Default)]
pub struct ComponentStore {
    columns: HashMap<ComponentKind, HashMap<Entity, Component>>,
}

impl ComponentStore {
    /// Create an empty store. Backing maps appear as kinds are first used.
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
        }
    }

    /// Insert or overwrite the component of `value`'s kind on `entity`.
    pub fn insert(&mut self, entity: Entity, value: Component) {
        self.columns
            .entry(value.kind())
            .or_default()
            .insert(entity, value);
    }

    /// Borrow the component of `kind` on `entity`.
    pub fn get(&self, entity: Entity, kind: ComponentKind) -> Option<&Component> {
        self.columns.get(&kind)?.get(&entity)
    }

    /// Mutably borrow the component of `kind` on `entity`.
    pub fn get_mut(&mut self, entity: Entity, kind: ComponentKind) -> Option<&mut Component> {
        self.columns.get_mut(&kind)?.get_mut(&entity)
    }

    /// Borrow the record of type `T` on `entity`.
    pub fn get_as<T: ComponentRecord>(&self, entity: Entity) -> Option<&T> {
        self.get(entity, T::KIND).and_then(T::from_component)
    }

    /// Mutably borrow the record of type `T` on `entity`.
    pub fn get_mut_as<T: ComponentRecord>(&mut self, entity: Entity) -> Option<&mut T> {
        self.get_mut(entity, T::KIND).and_then(T::from_component_mut)
    }

    /// Whether `entity` currently holds a component of `kind`.
    pub fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.columns
            .get(&kind)
            .is_some_and(|column| column.contains_key(&entity))
    }

    /// Remove and return the component of `kind` on `entity`. No-op (and
    /// `None`) if absent.
    pub fn remove(&mut self, entity: Entity, kind: ComponentKind) -> Option<Component> {
        self.columns.get_mut(&kind)?.remove(&entity)
    }

    /// Remove and return the record of type `T` on `entity`.
    pub fn take<T: ComponentRecord>(&mut self, entity: Entity) -> Option<T> {
        self.remove(entity, T::KIND).and_then(T::take_from)
    }

    /// Every entity currently holding `kind`, as a snapshot in ascending
    /// handle order. The copy makes the scan stable under mutation: removing
    /// entries mid-iteration neither skips nor duplicates entities.
    pub fn entities_with(&self, kind: ComponentKind) -> Vec<Entity> {
        let Some(column) = self.columns.get(&kind) else {
            return Vec::new();
        };
        let mut entities: Vec<Entity> = column.keys().copied().collect();
        entities.sort_unstable();
        entities
    }

    /// Number of entities holding `kind`.
    pub fn count(&self, kind: ComponentKind) -> usize {
        self.columns.get(&kind).map_or(0, HashMap::len)
    }

    /// Clear every kind's entry for `entity`. Invoked once at destruction.
    pub fn remove_all(&mut self, entity: Entity) {
        for column in self.columns.values_mut() {
            column.remove(&entity);
        }
    }

    /// Drop every entry of `kind`, returning how many were dropped.
    pub fn clear_kind(&mut self, kind: ComponentKind) -> usize {
        self.columns.get_mut(&kind).map_or(0, |column| {
            let dropped = column.len();
            column.clear();
            dropped
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Health, Position, Sprite};
    use crate::entity::EntityRegistry;

    fn fixtures() -> (ComponentStore, Entity, Entity) {
        let mut registry = EntityRegistry::new();
        (ComponentStore::new(), registry.create(), registry.create())
    }

    #[test]
    fn set_get_roundtrip() {
        let (mut store, a, _) = fixtures();
        store.insert(a, Position { x: 3, y: 7 }.into());
        assert_eq!(store.get_as::<Position>(a), Some(&Position { x: 3, y: 7 }));
        assert!(store.has(a, ComponentKind::Position));
    }

    #[test]
    fn insert_overwrites() {
        let (mut store, a, _) = fixtures();
        store.insert(a, Health { hp: 10, max_hp: 10 }.into());
        store.insert(a, Health { hp: 4, max_hp: 10 }.into());
        assert_eq!(store.get_as::<Health>(a).unwrap().hp, 4);
        assert_eq!(store.count(ComponentKind::Health), 1);
    }

    #[test]
    fn absent_lookups_return_none() {
        let (store, a, _) = fixtures();
        assert!(store.get(a, ComponentKind::Sprite).is_none());
        assert!(store.get_as::<Sprite>(a).is_none());
        assert!(!store.has(a, ComponentKind::Sprite));
        assert!(store.entities_with(ComponentKind::Sprite).is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut store, a, _) = fixtures();
        store.insert(a, Position { x: 0, y: 0 }.into());
        assert!(store.remove(a, ComponentKind::Position).is_some());
        assert!(store.remove(a, ComponentKind::Position).is_none());
        assert!(!store.has(a, ComponentKind::Position));
    }

    #[test]
    fn get_mut_modifies_in_place() {
        let (mut store, a, _) = fixtures();
        store.insert(a, Health { hp: 10, max_hp: 20 }.into());
        store.get_mut_as::<Health>(a).unwrap().hp = 15;
        assert_eq!(store.get_as::<Health>(a).unwrap().hp, 15);
    }

    #[test]
    fn entities_with_is_a_stable_snapshot() {
        let (mut store, a, b) = fixtures();
        store.insert(a, Position { x: 0, y: 0 }.into());
        store.insert(b, Position { x: 1, y: 1 }.into());

        let scanned = store.entities_with(ComponentKind::Position);
        assert_eq!(scanned, vec![a, b]);

        // Removing mid-scan must not disturb the snapshot being walked.
        let mut visited = Vec::new();
        for entity in &scanned {
            store.remove(*entity, ComponentKind::Position);
            visited.push(*entity);
        }
        assert_eq!(visited, scanned);
        assert_eq!(store.count(ComponentKind::Position), 0);
    }

    #[test]
    fn remove_all_clears_every_kind() {
        let (mut store, a, b) = fixtures();
        store.insert(a, Position { x: 0, y: 0 }.into());
        store.insert(a, Health { hp: 5, max_hp: 5 }.into());
        store.insert(b, Position { x: 9, y: 9 }.into());

        store.remove_all(a);
        for kind in ComponentKind::ALL {
            assert!(!store.has(a, kind));
        }
        assert!(store.has(b, ComponentKind::Position));
    }

    #[test]
    fn take_returns_owned_record() {
        let (mut store, a, _) = fixtures();
        store.insert(a, Sprite { glyph: '@' }.into());
        assert_eq!(store.take::<Sprite>(a), Some(Sprite { glyph: '@' }));
        assert!(!store.has(a, ComponentKind::Sprite));
    }

    #[test]
    fn clear_kind_reports_dropped_count() {
        let (mut store, a, b) = fixtures();
        store.insert(a, Position { x: 0, y: 0 }.into());
        store.insert(b, Position { x: 1, y: 0 }.into());
        assert_eq!(store.clear_kind(ComponentKind::Position), 2);
        assert_eq!(store.clear_kind(ComponentKind::Position), 0);
    }
}
