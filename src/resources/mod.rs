//! ECS resources made available to systems.
//!
//! Overview
//! - `appconfig` – window settings and declared controllers loaded from INI
//! - `assetcache` – memoizing caches for fonts, textures and other assets
//! - `controllerregistry` – named controllers and entity binding
//! - `input` – keys and pointer buttons held during the current frame
//! - `lua_runtime` – Lua interpreter and the `engine` scripting API
//! - `windowsize` – window dimensions and pending window requests
//! - `worldtime` – simulation time and delta
pub mod appconfig;
pub mod assetcache;
pub mod controllerregistry;
pub mod input;
#[cfg(feature = "lua")]
pub mod lua_runtime;
pub mod windowsize;
pub mod worldtime;
