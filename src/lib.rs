//! raybind library.
//!
//! Named input controllers that entities can own, a memoizing asset cache
//! and a deferred draw queue, built on `bevy_ecs` and raylib. The modules
//! are exposed for the demo binary and for integration tests.

pub mod components;
pub mod controllers;
pub mod drawable;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
