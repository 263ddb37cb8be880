//! Engine systems.
//!
//! Submodules overview
//! - [`controllers`] – advance controller input messages and update bound controllers
//! - [`input`] – sample raylib into [`crate::resources::input::HeldInputs`]
//! - [`inputsimplecontroller`] – move controlled entities from logical inputs
//! - [`lua_commands`] – apply commands queued by Lua scripts
//! - [`luacallbacks`] – call Lua controller handlers and the per-frame hook
//! - [`movement`] – integrate velocities and bounce inside the window
//! - [`render`] – flush the deferred draw queue to a render surface
//! - [`shapevisual`] – queue entity drawables for the frame
//! - [`time`] – update simulation time and delta
//! - [`window`] – apply window requests and track the window size

pub mod controllers;
pub mod input;
pub mod inputsimplecontroller;
#[cfg(feature = "lua")]
pub mod lua_commands;
#[cfg(feature = "lua")]
pub mod luacallbacks;
pub mod movement;
pub mod render;
pub mod shapevisual;
pub mod time;
pub mod window;
