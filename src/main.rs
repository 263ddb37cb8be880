//! raybind demo entry point.
//!
//! Opens a raylib window and runs a small scene on top of the library:
//! - **raylib** for windowing, input and drawing
//! - **bevy_ecs** for entities, resources and the frame schedule
//! - **mlua + LuaJIT** (feature `lua`) for optional scripting
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, open the window, build the ECS world and resources
//! 2. Register configured controllers, spawn the scene, bind the player
//! 3. Each frame:
//!    - sample input and update bound controllers
//!    - react to controller input (Rust movement, Lua handlers)
//!    - queue draw commands (shapes, HUD, Lua `engine.draw`)
//!    - flush the draw queue to the window
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config config.ini --script assets/scripts/main.lua
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use raybind::events::controllerinput::ControllerInputEvent;
use raybind::events::render::RenderDrawableEvent;
use raybind::game;
use raybind::resources::appconfig::AppConfig;
use raybind::resources::assetcache::{FontCache, TextureCache};
use raybind::resources::controllerregistry::ControllerRegistry;
use raybind::resources::input::HeldInputs;
use raybind::resources::windowsize::{WindowRequests, WindowSize};
use raybind::resources::worldtime::WorldTime;
use raybind::systems::controllers::{update_controller_input_messages, update_controllers};
use raybind::systems::input::sample_held_inputs;
use raybind::systems::inputsimplecontroller::input_simple_controller;
use raybind::systems::movement::{bounce_inside_window, movement};
use raybind::systems::render::flush_draw_commands;
use raybind::systems::shapevisual::queue_shape_draws;
use raybind::systems::time::update_world_time;
use raybind::systems::window::apply_window_requests;
#[cfg(feature = "lua")]
use raybind::resources::lua_runtime::LuaRuntime;
#[cfg(feature = "lua")]
use raybind::systems::lua_commands::{apply_lua_commands, refresh_lua_snapshots};
#[cfg(feature = "lua")]
use raybind::systems::luacallbacks::{lua_controller_input_system, lua_frame_system};

/// raybind: named controllers, cached assets and deferred drawing on raylib.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file to load (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Lua script to run after the scene is built.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Number of bouncing shapes, overriding the configuration.
    #[arg(long, value_name = "N")]
    shapes: Option<u32>,

    /// Print the configured controllers as JSON and exit.
    #[arg(long)]
    dump_controllers: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AppConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(shapes) = cli.shapes {
        config.shape_count = shapes;
    }

    // Early-exit: dump controllers and quit (no window needed)
    if cli.dump_controllers {
        match config.controllers_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title(&config.window_title)
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(WindowRequests::default());
    world.insert_resource(HeldInputs::default());
    world.insert_resource(ControllerRegistry::new());
    world.init_resource::<Messages<ControllerInputEvent>>();
    world.init_resource::<Messages<RenderDrawableEvent>>();
    world.insert_resource(config);
    world.insert_non_send_resource(FontCache::new());
    world.insert_non_send_resource(TextureCache::new());
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut rng = fastrand::Rng::new();
    let player = game::setup(&mut world, &mut rng);
    log::info!("Player entity: {}", player.to_bits());

    #[cfg(feature = "lua")]
    {
        let lua_runtime = LuaRuntime::new().expect("Failed to create Lua runtime");
        lua_runtime
            .lua()
            .globals()
            .set("player_id", player.to_bits())
            .expect("Failed to expose player id to Lua");
        world.insert_non_send_resource(lua_runtime);
        refresh_lua_snapshots(&mut world);
        if let Some(path) = &cli.script {
            let path = path.to_string_lossy();
            if let Err(e) = world.non_send_resource::<LuaRuntime>().run_script(&path) {
                log::error!("Failed to load {}: {}", path, e);
            }
        }
        apply_lua_commands(&mut world);
    }
    #[cfg(not(feature = "lua"))]
    if cli.script.is_some() {
        log::warn!("Built without Lua support; ignoring --script");
    }

    let mut update = Schedule::default();
    update.add_systems(
        (
            update_controller_input_messages,
            sample_held_inputs,
            update_controllers,
        )
            .chain(),
    );
    #[cfg(feature = "lua")]
    update.add_systems(lua_controller_input_system.after(update_controllers));
    update.add_systems(input_simple_controller.after(update_controllers));
    update.add_systems((movement, bounce_inside_window).chain());
    update.add_systems(
        (queue_shape_draws, game::hud)
            .chain()
            .after(input_simple_controller)
            .after(bounce_inside_window),
    );
    #[cfg(feature = "lua")]
    update.add_systems(
        (lua_frame_system, apply_lua_commands)
            .chain()
            .after(lua_controller_input_system)
            .after(game::hud)
            .before(apply_window_requests),
    );
    update.add_systems(apply_window_requests.after(game::hud));
    update.add_systems(flush_draw_commands.after(apply_window_requests));

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !world.resource::<WindowRequests>().close
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    log::info!("Bye!");
}
