//! Event and message types exchanged across systems.
//!
//! Submodules:
//! - [`controllerinput`] – logical input produced by bound controllers
//! - [`render`] – deferred draw commands flushed once per frame
pub mod controllerinput;
pub mod render;
