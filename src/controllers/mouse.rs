//! Pointer (mouse) controller.
//!
//! Maps [`PointerButton`]s to logical input names. Accepted button names are
//! `Left`, `Right`, `Middle`, `XButton1` and `XButton2`.

use bevy_ecs::prelude::*;
use std::collections::BTreeMap;

use super::{Controller, ControllerCore, parse_controls};
use crate::events::controllerinput::ControllerInputEvent;
use crate::resources::input::{HeldInputs, PointerButton};

/// Publishes one event per held mapped button.
#[derive(Debug, Default)]
pub struct MouseController {
    core: ControllerCore,
    controls: BTreeMap<PointerButton, String>,
}

impl MouseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller from a button-name → logical-name mapping.
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

    pub fn map_button(&mut self, button: PointerButton, input: impl Into<String>) {
        self.controls.insert(button, input.into());
    }

    pub fn controls(&self) -> &BTreeMap<PointerButton, String> {
        &self.controls
    }
}

impl Controller for MouseController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn kind(&self) -> &'static str {
        "mouse"
    }

    fn update(&mut self, input: &HeldInputs, dt: f32, bus: &mut Messages<ControllerInputEvent>) {
        let Some(entity) = self.core.bound_entity else {
            return;
        };
        for (button, logical) in &self.controls {
            if input.is_button_down(*button) {
                bus.write(ControllerInputEvent {
                    entity,
                    input: logical.clone(),
                    dt,
                });
            }
        }
    }
}
