//! Application configuration resource.
//!
//! Settings are read from an INI file with safe defaults for anything
//! missing. Besides the window settings, every `controller:<name>` section
//! declares a named controller: `kind` picks the variant and every other
//! entry maps a physical input to a logical name.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! title = raybind
//! target_fps = 60
//!
//! [demo]
//! shapes = 12
//!
//! [controller:wasd]
//! kind = keyboard
//! w = up
//! a = left
//! s = down
//! d = right
//! ```
//!
//! Section and key names are case-insensitive and stored lowercased, so
//! `[controller:WASD]` registers a controller named `wasd`. Physical input
//! names are parsed the same way regardless of case.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::controllers::ControllerKind;
use crate::resources::controllerregistry::ControllerRegistry;

const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_WINDOW_TITLE: &str = "raybind";
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SHAPE_COUNT: u32 = 12;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

const CONTROLLER_SECTION_PREFIX: &str = "controller:";
const KIND_KEY: &str = "kind";

/// A controller declared in configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSpec {
    pub name: String,
    pub kind: ControllerKind,
    /// Physical input name → logical input name.
    pub controls: BTreeMap<String, String>,
}

impl ControllerSpec {
    /// Build the controller and register it under its name.
    pub fn register(&self, registry: &mut ControllerRegistry) {
        registry.create(self.name.clone(), self.kind, &self.controls);
    }
}

/// Application configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct AppConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
    pub target_fps: u32,
    /// Number of bouncing shapes the demo spawns.
    pub shape_count: u32,
    /// Declared controllers, sorted by name.
    pub controllers: Vec<ControllerSpec>,
    pub config_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Create a configuration with safe default values and no controllers.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
            shape_count: DEFAULT_SHAPE_COUNT,
            controllers: Vec::new(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from `config_path`.
    ///
    /// Missing values keep their current values. Returns an error if the file
    /// cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(title) = config.get("window", "title") {
            self.window_title = title;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [demo] section
        if let Some(shapes) = config.getuint("demo", "shapes").ok().flatten() {
            self.shape_count = shapes as u32;
        }

        let controllers = controller_specs(config.get_map_ref());
        if !controllers.is_empty() {
            self.controllers = controllers;
        }

        info!(
            "Loaded config: {}x{} window '{}', fps={}, {} controller(s)",
            self.window_width,
            self.window_height,
            self.window_title,
            self.target_fps,
            self.controllers.len()
        );
    }

    /// Save configuration to `config_path`, creating the file if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "title", Some(self.window_title.clone()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("demo", "shapes", Some(self.shape_count.to_string()));

        for spec in &self.controllers {
            let section = format!("{}{}", CONTROLLER_SECTION_PREFIX, spec.name);
            config.set(&section, KIND_KEY, Some(spec.kind.as_str().to_string()));
            for (physical, logical) in &spec.controls {
                config.set(&section, physical, Some(logical.clone()));
            }
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Register every declared controller. Returns how many were registered.
    pub fn register_controllers(&self, registry: &mut ControllerRegistry) -> usize {
        for spec in &self.controllers {
            spec.register(registry);
        }
        self.controllers.len()
    }

    /// Declared controllers as pretty-printed JSON.
    pub fn controllers_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.controllers)
            .map_err(|e| format!("Failed to serialize controllers: {}", e))
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn controller_specs(
    sections: &HashMap<String, HashMap<String, Option<String>>>,
) -> Vec<ControllerSpec> {
    let mut specs = Vec::new();
    for (section, entries) in sections {
        let Some(name) = section.strip_prefix(CONTROLLER_SECTION_PREFIX) else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            warn!("Ignoring controller section without a name");
            continue;
        }

        let kind = match entries.get(KIND_KEY).cloned().flatten() {
            None => ControllerKind::Keyboard,
            Some(kind) => match kind.parse::<ControllerKind>() {
                Ok(kind) => kind,
                Err(()) => {
                    warn!("Ignoring controller '{}': unknown kind '{}'", name, kind);
                    continue;
                }
            },
        };

        let controls = entries
            .iter()
            .filter(|(key, _)| key.as_str() != KIND_KEY)
            .filter_map(|(key, value)| value.clone().map(|value| (key.clone(), value)))
            .collect();

        specs.push(ControllerSpec {
            name: name.to_string(),
            kind,
            controls,
        });
    }
    specs.sort_by(|a, b| a.name.cmp(&b.name));
    specs
}
