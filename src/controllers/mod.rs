//! Named input controllers.
//!
//! A controller samples one physical input source and turns held inputs into
//! [`ControllerInputEvent`]s for whichever entity currently owns it. The
//! [`ControllerRegistry`](crate::resources::controllerregistry::ControllerRegistry)
//! names controllers, binds them to entities and updates them every frame.
//!
//! All variants share the [`Controller`] trait and a [`ControllerCore`] with
//! the name and the bound entity. The bound entity is a plain [`Entity`] id:
//! a controller never keeps an entity alive, and the registry checks liveness
//! before every update.
//!
//! Variants:
//! - [`keyboard`] – keyboard keys to logical names
//! - [`mouse`] – pointer buttons to logical names

pub mod keyboard;
pub mod mouse;

use bevy_ecs::prelude::*;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::controllerinput::ControllerInputEvent;
use crate::resources::input::HeldInputs;

pub use keyboard::KeyboardController;
pub use mouse::MouseController;

/// Shared handle to a controller.
///
/// The registry keeps one clone and the owning entity's
/// [`ControllerBinding`](crate::components::controllerbinding::ControllerBinding)
/// keeps another. The controller is dropped once both are gone.
pub type ControllerRef = Arc<Mutex<dyn Controller>>;

/// State every controller variant carries.
#[derive(Debug, Default)]
pub struct ControllerCore {
    /// Registry name. Empty until the controller is registered.
    pub name: String,
    /// Entity the controller publishes events for.
    pub bound_entity: Option<Entity>,
}

impl Drop for ControllerCore {
    fn drop(&mut self) {
        debug!("destroy controller {}", self.name);
    }
}

/// A named, updatable source of logical input events.
pub trait Controller: Send + Sync {
    fn core(&self) -> &ControllerCore;

    fn core_mut(&mut self) -> &mut ControllerCore;

    /// Short variant name, as accepted by [`ControllerKind::from_str`].
    fn kind(&self) -> &'static str;

    /// Sample the input source and publish one event per held input.
    ///
    /// Only called while the bound entity is alive; variants do not check.
    fn update(&mut self, input: &HeldInputs, dt: f32, bus: &mut Messages<ControllerInputEvent>);

    fn name(&self) -> &str {
        &self.core().name
    }

    fn set_name(&mut self, name: String) {
        self.core_mut().name = name;
    }

    fn bound_entity(&self) -> Option<Entity> {
        self.core().bound_entity
    }

    fn bind_to(&mut self, entity: Entity) {
        self.core_mut().bound_entity = Some(entity);
    }

    /// Forget the bound entity. Calling it again is a no-op.
    fn release(&mut self) {
        self.core_mut().bound_entity = None;
    }
}

/// Wrap a controller in a shared handle.
pub fn share<C: Controller + 'static>(controller: C) -> ControllerRef {
    Arc::new(Mutex::new(controller))
}

/// Lock a shared controller.
///
/// The frame loop is single threaded, so a poisoned lock only means an
/// earlier panic while the guard was held; the data is still usable.
pub fn lock_controller(controller: &ControllerRef) -> MutexGuard<'_, dyn Controller + 'static> {
    controller.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Controller variants that can be built from a name/mapping pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    Keyboard,
    Mouse,
}

impl FromStr for ControllerKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyboard" => Ok(ControllerKind::Keyboard),
            "mouse" | "pointer" => Ok(ControllerKind::Mouse),
            _ => Err(()),
        }
    }
}

impl ControllerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::Keyboard => "keyboard",
            ControllerKind::Mouse => "mouse",
        }
    }

    /// Build an unnamed controller of this kind from a
    /// physical-name → logical-name mapping.
    pub fn build<I, K, V>(&self, mapping: I) -> ControllerRef
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        match self {
            ControllerKind::Keyboard => share(KeyboardController::from_map(mapping)),
            ControllerKind::Mouse => share(MouseController::from_map(mapping)),
        }
    }
}

/// Parse physical input names into a control map.
///
/// Unknown physical names are skipped. Later duplicates of the same physical
/// input replace earlier ones.
pub(crate) fn parse_controls<P, I, K, V>(mapping: I) -> BTreeMap<P, String>
where
    P: FromStr + Ord,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut controls = BTreeMap::new();
    for (physical, logical) in mapping {
        match physical.as_ref().parse::<P>() {
            Ok(p) => {
                controls.insert(p, logical.into());
            }
            Err(_) => debug!("Skipping unknown physical input '{}'", physical.as_ref()),
        }
    }
    controls
}
