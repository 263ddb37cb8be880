//! Keyboard controller.
//!
//! Maps physical [`Key`]s to logical input names. Built from a string map
//! such as `{"w": "up", "a": "left"}`; names that are not keys are skipped.

use bevy_ecs::prelude::*;
use std::collections::BTreeMap;

use super::{Controller, ControllerCore, parse_controls};
use crate::events::controllerinput::ControllerInputEvent;
use crate::resources::input::{HeldInputs, Key};

/// Publishes one event per held mapped key.
#[derive(Debug, Default)]
pub struct KeyboardController {
    core: ControllerCore,
    controls: BTreeMap<Key, String>,
}

impl KeyboardController {
    /// Create a controller with no mapped keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller from a key-name → logical-name mapping.
    ///
    /// Does not set the controller name; the registry assigns it.
    pub fn from_map<I, K, V>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            core: ControllerCore::default(),
            controls: parse_controls(mapping),
        }
    }

    /// Map `key` to `input`, replacing any previous mapping for that key.
    pub fn map_key(&mut self, key: Key, input: impl Into<String>) {
        self.controls.insert(key, input.into());
    }

    pub fn controls(&self) -> &BTreeMap<Key, String> {
        &self.controls
    }
}

impl Controller for KeyboardController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn kind(&self) -> &'static str {
        "keyboard"
    }

    fn update(&mut self, input: &HeldInputs, dt: f32, bus: &mut Messages<ControllerInputEvent>) {
        let Some(entity) = self.core.bound_entity else {
            return;
        };
        for (key, logical) in &self.controls {
            if input.is_key_down(*key) {
                bus.write(ControllerInputEvent {
                    entity,
                    input: logical.clone(),
                    dt,
                });
            }
        }
    }
}
