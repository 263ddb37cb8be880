//! Window size and window request resources.
//!
//! [`WindowSize`] tracks the actual window dimensions in pixels and is
//! refreshed every frame. [`WindowRequests`] collects changes asked for
//! during the frame (by scripts, for instance); they are applied to the
//! raylib window by
//! [`apply_window_requests`](crate::systems::window::apply_window_requests).

use bevy_ecs::prelude::Resource;

/// Current window size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

/// Pending window changes.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowRequests {
    /// Once set, the main loop exits after the current frame.
    pub close: bool,
    /// New window size, applied once.
    pub resize: Option<(i32, i32)>,
}
