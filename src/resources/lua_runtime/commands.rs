//! Command enums for Lua-Rust communication.
//!
//! Lua functions on the `engine` table never touch the ECS world directly.
//! They push these commands into queues that
//! [`apply_lua_commands`](crate::systems::lua_commands::apply_lua_commands)
//! drains after the scripts have run.

use crate::controllers::ControllerKind;

/// Controller commands that Lua can queue.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerCmd {
    /// Build a controller and register it, replacing any controller with the same name.
    Create {
        name: String,
        kind: ControllerKind,
        /// Physical input name → logical input name.
        controls: Vec<(String, String)>,
    },
    /// Bind the named controller to an entity.
    Take { entity_id: u64, name: String },
}

/// Window commands that Lua can queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowCmd {
    Close,
    SetSize { width: i32, height: i32 },
}
