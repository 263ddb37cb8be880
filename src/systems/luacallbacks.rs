//! Lua callback systems.
//!
//! - [`lua_controller_input_system`] forwards each frame's
//!   [`ControllerInputEvent`]s to the handler a script installed with
//!   `engine.set_controller_callback(input, fn)`. The handler receives the
//!   entity id and the frame delta.
//! - [`lua_frame_system`] calls the global `on_frame(dt)` if a script defines it.
//!
//! Script errors are logged and never stop the frame.
use bevy_ecs::prelude::*;
use log::error;

use crate::events::controllerinput::ControllerInputEvent;
use crate::resources::lua_runtime::LuaRuntime;
use crate::resources::worldtime::WorldTime;

pub fn lua_controller_input_system(
    mut reader: MessageReader<ControllerInputEvent>,
    runtime: NonSend<LuaRuntime>,
) {
    for event in reader.read() {
        if let Err(e) =
            runtime.call_controller_callback(&event.input, event.entity.to_bits(), event.dt)
        {
            error!(target: "lua", "Controller callback '{}' failed: {}", event.input, e);
        }
    }
}

pub fn lua_frame_system(runtime: NonSend<LuaRuntime>, time: Res<WorldTime>) {
    if !runtime.has_function("on_frame") {
        return;
    }
    if let Err(e) = runtime.call_function::<_, ()>("on_frame", time.delta) {
        error!(target: "lua", "on_frame failed: {}", e);
    }
}
