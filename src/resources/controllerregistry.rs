//! Named controller registry.
//!
//! [`ControllerRegistry`] maps names to shared controllers. It binds a
//! controller to an entity on request and updates every bound controller
//! once per frame.
//!
//! Ownership: the registry holds one strong reference to each controller and
//! the owning entity's [`ControllerBinding`] holds another. Removing the
//! registry entry does not stop an entity from keeping its controller, and
//! despawning the entity does not unregister it.
//!
//! Rebinding policy: binding a controller that is owned by another entity
//! first removes that entity's binding, and binding an entity that already
//! owns a different controller releases the old one. A controller therefore
//! has at most one owner, and an owner at most one controller.

use bevy_ecs::prelude::*;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::components::controllerbinding::ControllerBinding;
use crate::controllers::{ControllerKind, ControllerRef, lock_controller};
use crate::events::controllerinput::ControllerInputEvent;
use crate::resources::input::HeldInputs;

/// Name → controller table.
#[derive(Resource, Default)]
pub struct ControllerRegistry {
    controllers: FxHashMap<String, ControllerRef>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `controller` under `name`, replacing any previous entry.
    ///
    /// The controller takes `name` as its own. Returns the replaced
    /// controller, which stays bound to its entity if it had one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        controller: ControllerRef,
    ) -> Option<ControllerRef> {
        let name = name.into();
        lock_controller(&controller).set_name(name.clone());
        debug!("Registered controller '{}'", name);
        self.controllers.insert(name, controller)
    }

    /// Build a controller of `kind` from `mapping` and register it under `name`.
    pub fn create<I, K, V>(
        &mut self,
        name: impl Into<String>,
        kind: ControllerKind,
        mapping: I,
    ) -> ControllerRef
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let controller = kind.build(mapping);
        self.register(name, controller.clone());
        controller
    }

    pub fn get(&self, name: &str) -> Option<&ControllerRef> {
        self.controllers.get(name)
    }

    /// Remove the entry for `name`. An entity that owns the controller keeps it.
    pub fn remove(&mut self, name: &str) -> Option<ControllerRef> {
        self.controllers.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.controllers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Give the controller registered as `name` to `entity`.
    ///
    /// Returns `false` when `entity` is not alive in `world` or `name` is not
    /// registered; the latter logs the registered names.
    pub fn bind(&self, name: &str, world: &mut World, entity: Entity) -> bool {
        if world.get_entity(entity).is_err() {
            debug!("Cannot bind '{}': {:?} is not alive", name, entity);
            return false;
        }

        let Some(controller) = self.controllers.get(name).cloned() else {
            warn!(
                "Controller not found: {}. Registered controllers: [{}]",
                name,
                self.names().join(", ")
            );
            return false;
        };

        let previous = lock_controller(&controller).bound_entity();
        if let Some(previous) = previous {
            if previous != entity {
                let owned_by_previous = world
                    .get::<ControllerBinding>(previous)
                    .is_some_and(|binding| binding.holds(&controller));
                if owned_by_previous {
                    // The hook releases the controller.
                    world.entity_mut(previous).remove::<ControllerBinding>();
                } else {
                    lock_controller(&controller).release();
                }
            }
        }

        // Overwriting an existing binding runs its hook first.
        world
            .entity_mut(entity)
            .insert(ControllerBinding::new(controller.clone()));
        lock_controller(&controller).bind_to(entity);

        debug!("Bound controller '{}' to {:?}", name, entity);
        true
    }

    /// Take away whatever controller `entity` owns.
    ///
    /// Returns `false` if `entity` is not alive or owns no controller.
    pub fn unbind(&self, world: &mut World, entity: Entity) -> bool {
        let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
            return false;
        };
        if !entity_mut.contains::<ControllerBinding>() {
            return false;
        }
        entity_mut.remove::<ControllerBinding>();
        true
    }

    /// Update every controller whose bound entity is alive.
    ///
    /// Unbound controllers and controllers whose entity has died are skipped.
    /// Each controller is updated at most once. Events go to the
    /// `Messages<ControllerInputEvent>` resource, which is created if missing.
    /// Without a [`HeldInputs`] resource every input reads as released.
    pub fn update_all(&self, world: &mut World, dt: f32) {
        world.init_resource::<Messages<ControllerInputEvent>>();
        world.resource_scope(|world, mut bus: Mut<Messages<ControllerInputEvent>>| {
            let released = HeldInputs::default();
            let input = world.get_resource::<HeldInputs>().unwrap_or(&released);
            for controller in self.controllers.values() {
                let mut controller = lock_controller(controller);
                let Some(entity) = controller.bound_entity() else {
                    continue;
                };
                if world.get_entity(entity).is_err() {
                    continue;
                }
                controller.update(input, dt, &mut bus);
            }
        });
    }
}

/// [`ControllerRegistry::bind`] for a registry stored as a resource of `world`.
///
/// Returns `false` when the world has no registry.
pub fn bind_controller(world: &mut World, name: &str, entity: Entity) -> bool {
    if !world.contains_resource::<ControllerRegistry>() {
        warn!("Cannot bind '{}': no ControllerRegistry resource", name);
        return false;
    }
    world.resource_scope(|world, registry: Mut<ControllerRegistry>| {
        registry.bind(name, world, entity)
    })
}
