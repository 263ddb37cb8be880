//! Window request system.
//!
//! Applies pending [`WindowRequests`] to the raylib window and refreshes the
//! [`WindowSize`] resource from the real window dimensions.
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::windowsize::{WindowRequests, WindowSize};

pub fn apply_window_requests(
    mut requests: ResMut<WindowRequests>,
    mut size: ResMut<WindowSize>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
) {
    if let Some((w, h)) = requests.resize.take() {
        info!("Resizing window to {}x{}", w, h);
        rl.set_window_size(w, h);
    }
    let (w, h) = (rl.get_screen_width(), rl.get_screen_height());
    if size.w != w || size.h != h {
        size.w = w;
        size.h = h;
    }
}
