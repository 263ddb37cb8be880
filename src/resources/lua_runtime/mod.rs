//! Lua scripting runtime.
//!
//! Exposes the controller, window and draw functionality through the global
//! `engine` table in Lua scripts.
//!
//! # Architecture
//!
//! - [`commands`] - Command enums queued by Lua and applied by Rust systems
//! - [`drawtable`] - Conversion of `engine.draw` tables into drawables
//! - [`runtime`] - Core Lua runtime implementation and `engine` table API
//!
//! `engine.take_controller(entity_id, name)` returns nothing. The bind runs
//! when the queued command is applied, after the script has returned, so
//! success or failure (unknown name, dead or invalid entity id) is only
//! reported in the log.
//!
//! Functions that answer synchronously (`engine.controllers()`,
//! `engine.window_size()`) read snapshots refreshed by
//! [`apply_lua_commands`](crate::systems::lua_commands::apply_lua_commands).
//!
//! # Example
//!
//! ```lua
//! engine.create_controller("wasd", "keyboard", { w = "up", a = "left", s = "down", d = "right" })
//! engine.take_controller(player_id, "wasd")
//! engine.set_controller_callback("up", function(entity_id, dt)
//!     engine.log("up pressed by " .. entity_id)
//! end)
//!
//! function on_frame(dt)
//!     engine.draw({ text = "hello", x = 10, y = 10, size = 20 })
//! end
//! ```

mod commands;
mod drawtable;
mod runtime;

pub use commands::*;
pub use drawtable::parse_drawable;
pub use runtime::LuaRuntime;
