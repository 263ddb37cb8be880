//! Controller ownership component.
//!
//! [`ControllerBinding`] records which controller an entity currently owns.
//! It is only inserted by
//! [`ControllerRegistry::bind`](crate::resources::controllerregistry::ControllerRegistry::bind).
//!
//! The component registers an `on_replace` hook. Bevy runs it when the
//! component is about to go away for any reason: entity despawn, explicit
//! removal, or being overwritten by a new binding. The hook releases the
//! held controller, so its bound entity never outlives the binding.

use bevy_ecs::lifecycle::HookContext;
use bevy_ecs::prelude::*;
use bevy_ecs::world::DeferredWorld;
use log::debug;
use std::sync::Arc;

use crate::controllers::{ControllerRef, lock_controller};

/// Strong reference from an entity to the controller it owns.
///
/// While the reference is set, the controller's bound entity is this entity.
#[derive(Component)]
#[component(on_replace = release_bound_controller)]
pub struct ControllerBinding {
    controller: Option<ControllerRef>,
}

impl ControllerBinding {
    pub(crate) fn new(controller: ControllerRef) -> Self {
        Self {
            controller: Some(controller),
        }
    }

    pub fn controller(&self) -> Option<&ControllerRef> {
        self.controller.as_ref()
    }

    /// Whether this binding holds exactly `controller`.
    pub fn holds(&self, controller: &ControllerRef) -> bool {
        self.controller
            .as_ref()
            .is_some_and(|held| Arc::ptr_eq(held, controller))
    }

    /// Registry name of the held controller.
    pub fn controller_name(&self) -> Option<String> {
        self.controller
            .as_ref()
            .map(|controller| lock_controller(controller).name().to_string())
    }

    /// Release the held controller and drop this binding's reference.
    ///
    /// The component stays on the entity, empty. Returns the released
    /// controller; calling it again returns `None`.
    pub fn release(&mut self) -> Option<ControllerRef> {
        let controller = self.controller.take()?;
        lock_controller(&controller).release();
        Some(controller)
    }
}

/// Component hook: release the held controller if it is still bound here.
///
/// A controller that has since been bound elsewhere is left alone.
fn release_bound_controller(world: DeferredWorld, ctx: HookContext) {
    let Some(binding) = world.get::<ControllerBinding>(ctx.entity) else {
        return;
    };
    let Some(controller) = binding.controller() else {
        return;
    };
    let mut controller = lock_controller(controller);
    if controller.bound_entity() == Some(ctx.entity) {
        debug!(
            "Releasing controller '{}' from {:?}",
            controller.name(),
            ctx.entity
        );
        controller.release();
    }
}
