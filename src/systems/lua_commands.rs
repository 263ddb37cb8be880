//! Application of commands queued by Lua scripts.
//!
//! # Functions
//!
//! - [`apply_lua_commands`] – exclusive system draining every Lua queue
//! - [`process_controller_command`] – create or bind a controller
//! - [`process_window_command`] – record a close or resize request
//! - [`refresh_lua_snapshots`] – update the data Lua reads synchronously

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::events::render::RenderDrawableEvent;
use crate::resources::controllerregistry::{ControllerRegistry, bind_controller};
use crate::resources::lua_runtime::{ControllerCmd, LuaRuntime, WindowCmd};
use crate::resources::windowsize::{WindowRequests, WindowSize};

/// Drain the Lua command queues and apply them to `world`, then refresh
/// the snapshots scripts read.
///
/// Controller commands run first, so a script can create a controller and
/// take it in the same frame. Drawables are appended to the render queue in
/// the order the script issued them. Does nothing without a [`LuaRuntime`].
pub fn apply_lua_commands(world: &mut World) {
    let (controller_cmds, window_cmds, drawables) = {
        let Some(runtime) = world.get_non_send_resource::<LuaRuntime>() else {
            return;
        };
        (
            runtime.drain_controller_commands(),
            runtime.drain_window_commands(),
            runtime.drain_draw_commands(),
        )
    };

    for cmd in controller_cmds {
        process_controller_command(world, cmd);
    }
    for cmd in window_cmds {
        process_window_command(world, cmd);
    }
    if !drawables.is_empty() {
        world.init_resource::<Messages<RenderDrawableEvent>>();
        let mut queue = world.resource_mut::<Messages<RenderDrawableEvent>>();
        for drawable in drawables {
            queue.write(RenderDrawableEvent { drawable });
        }
    }

    refresh_lua_snapshots(world);
}

/// Apply one controller command. Creates the registry if it is missing.
pub fn process_controller_command(world: &mut World, cmd: ControllerCmd) {
    match cmd {
        ControllerCmd::Create {
            name,
            kind,
            controls,
        } => {
            world
                .get_resource_or_insert_with(ControllerRegistry::default)
                .create(name.clone(), kind, controls);
            info!(target: "lua", "Created {} controller '{}'", kind.as_str(), name);
        }
        ControllerCmd::Take { entity_id, name } => {
            let Some(entity) = Entity::try_from_bits(entity_id) else {
                warn!(target: "lua", "Entity {} could not take controller '{}'", entity_id, name);
                return;
            };
            if bind_controller(world, &name, entity) {
                info!(target: "lua", "Entity {:?} took controller '{}'", entity, name);
            } else {
                warn!(target: "lua", "Entity {:?} could not take controller '{}'", entity, name);
            }
        }
    }
}

pub fn process_window_command(world: &mut World, cmd: WindowCmd) {
    let mut requests = world.get_resource_or_insert_with(WindowRequests::default);
    match cmd {
        WindowCmd::Close => requests.close = true,
        WindowCmd::SetSize { width, height } => requests.resize = Some((width, height)),
    }
}

/// Copy registered controller names and the window size into the runtime.
pub fn refresh_lua_snapshots(world: &mut World) {
    let names = world
        .get_resource::<ControllerRegistry>()
        .map(ControllerRegistry::names)
        .unwrap_or_default();
    let size = world.get_resource::<WindowSize>().copied();
    let Some(runtime) = world.get_non_send_resource::<LuaRuntime>() else {
        return;
    };
    runtime.update_controller_names_cache(names);
    if let Some(size) = size {
        runtime.update_window_size_cache(size.w, size.h);
    }
}
