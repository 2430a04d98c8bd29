//! Typed entity-component storage.
//!
//! The [`World`] owns entity allocation and one storage map per component
//! type, keyed by [`ComponentTypeId`]. Systems receive `&World` or
//! `&mut World` and never hold references across calls.

use std::any::Any;
use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::component::{Component, ComponentTypeId};
use crate::entity::{Entity, EntityAllocator};

/// Errors returned by [`World`] mutators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The entity was never spawned or has been despawned.
    #[error("{0} does not exist")]
    EntityNotFound(Entity),

    /// Another component type already owns this type name, so the two would
    /// share one [`ComponentTypeId`].
    #[error("component type name `{name}` is already used by a different type")]
    ComponentTypeConflict { name: &'static str },
}

/// Type-erased view of a single component storage, so the world can drop a
/// despawned entity from every storage without knowing the concrete types.
trait Storage: Send + Sync {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct ComponentStorage<T: Component> {
    items: HashMap<Entity, T>,
}

impl<T: Component> Storage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.items.remove(&entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The runtime entity-component store.
pub struct World {
    /// Entity ID allocator.
    allocator: EntityAllocator,
    /// Live entities, ordered by ID for deterministic iteration.
    alive: BTreeSet<Entity>,
    /// One storage per component type.
    storages: HashMap<ComponentTypeId, Box<dyn Storage>>,
}

impl World {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            alive: BTreeSet::new(),
            storages: HashMap::new(),
        }
    }

    /// Allocate a new entity without any components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.alive.insert(entity);
        entity
    }

    /// Destroy an entity and all of its components.
    ///
    /// Returns `true` if the entity existed and was removed.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.alive.remove(&entity) {
            return false;
        }
        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }
        true
    }

    /// Returns `true` if the entity is alive.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.alive.len()
    }

    /// Attach a component to an entity, returning the previous value if the
    /// entity already had one.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) -> Result<Option<T>, WorldError> {
        if !self.contains(entity) {
            return Err(WorldError::EntityNotFound(entity));
        }
        Ok(self.storage_mut_or_create::<T>()?.items.insert(entity, value))
    }

    /// Detach a component from an entity.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.items.remove(&entity)
    }

    /// Borrow an entity's component.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.items.get(&entity)
    }

    /// Mutably borrow an entity's component.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.items.get_mut(&entity)
    }

    /// Returns `true` if the entity carries a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Collect every entity carrying `T` together with its component, in
    /// entity ID order.
    #[must_use]
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        let Some(storage) = self.storage::<T>() else {
            return Vec::new();
        };
        let mut items: Vec<_> = storage.items.iter().map(|(e, c)| (*e, c)).collect();
        items.sort_by_key(|(e, _)| *e);
        items
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&T::component_type_id())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&T::component_type_id())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
    }

    fn storage_mut_or_create<T: Component>(&mut self) -> Result<&mut ComponentStorage<T>, WorldError> {
        self.storages
            .entry(T::component_type_id())
            .or_insert_with(|| {
                Box::new(ComponentStorage::<T> {
                    items: HashMap::new(),
                })
            })
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()
            .ok_or(WorldError::ComponentTypeConflict {
                name: T::type_name(),
            })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.alive.len())
            .field("component_types", &self.storages.len())
            .finish()
    }
}
