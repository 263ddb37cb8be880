//! Input sampling system.
//!
//! [`sample_held_inputs`] polls raylib once per frame and rewrites the
//! [`HeldInputs`](crate::resources::input::HeldInputs) resource. Controllers
//! never talk to raylib themselves, so they can be driven from tests by
//! writing `HeldInputs` directly.
use bevy_ecs::prelude::*;
use raylib::ffi::{KeyboardKey, MouseButton};

use crate::resources::input::{HeldInputs, Key, PointerButton};

/// Poll raylib for every known key and pointer button.
pub fn sample_held_inputs(mut held: ResMut<HeldInputs>, rl: NonSend<raylib::RaylibHandle>) {
    for key in Key::ALL {
        held.set_key(key, rl.is_key_down(raylib_key(key)));
    }
    for button in PointerButton::ALL {
        held.set_button(button, rl.is_mouse_button_down(raylib_button(button)));
    }
}

fn raylib_key(key: Key) -> KeyboardKey {
    match key {
        Key::A => KeyboardKey::KEY_A,
        Key::B => KeyboardKey::KEY_B,
        Key::C => KeyboardKey::KEY_C,
        Key::D => KeyboardKey::KEY_D,
        Key::E => KeyboardKey::KEY_E,
        Key::F => KeyboardKey::KEY_F,
        Key::G => KeyboardKey::KEY_G,
        Key::H => KeyboardKey::KEY_H,
        Key::I => KeyboardKey::KEY_I,
        Key::J => KeyboardKey::KEY_J,
        Key::K => KeyboardKey::KEY_K,
        Key::L => KeyboardKey::KEY_L,
        Key::M => KeyboardKey::KEY_M,
        Key::N => KeyboardKey::KEY_N,
        Key::O => KeyboardKey::KEY_O,
        Key::P => KeyboardKey::KEY_P,
        Key::Q => KeyboardKey::KEY_Q,
        Key::R => KeyboardKey::KEY_R,
        Key::S => KeyboardKey::KEY_S,
        Key::T => KeyboardKey::KEY_T,
        Key::U => KeyboardKey::KEY_U,
        Key::V => KeyboardKey::KEY_V,
        Key::W => KeyboardKey::KEY_W,
        Key::X => KeyboardKey::KEY_X,
        Key::Y => KeyboardKey::KEY_Y,
        Key::Z => KeyboardKey::KEY_Z,
        Key::Num0 => KeyboardKey::KEY_ZERO,
        Key::Num1 => KeyboardKey::KEY_ONE,
        Key::Num2 => KeyboardKey::KEY_TWO,
        Key::Num3 => KeyboardKey::KEY_THREE,
        Key::Num4 => KeyboardKey::KEY_FOUR,
        Key::Num5 => KeyboardKey::KEY_FIVE,
        Key::Num6 => KeyboardKey::KEY_SIX,
        Key::Num7 => KeyboardKey::KEY_SEVEN,
        Key::Num8 => KeyboardKey::KEY_EIGHT,
        Key::Num9 => KeyboardKey::KEY_NINE,
        Key::Up => KeyboardKey::KEY_UP,
        Key::Down => KeyboardKey::KEY_DOWN,
        Key::Left => KeyboardKey::KEY_LEFT,
        Key::Right => KeyboardKey::KEY_RIGHT,
        Key::Space => KeyboardKey::KEY_SPACE,
        Key::Enter => KeyboardKey::KEY_ENTER,
        Key::Escape => KeyboardKey::KEY_ESCAPE,
        Key::Tab => KeyboardKey::KEY_TAB,
        Key::Backspace => KeyboardKey::KEY_BACKSPACE,
        Key::LShift => KeyboardKey::KEY_LEFT_SHIFT,
        Key::RShift => KeyboardKey::KEY_RIGHT_SHIFT,
        Key::LControl => KeyboardKey::KEY_LEFT_CONTROL,
        Key::RControl => KeyboardKey::KEY_RIGHT_CONTROL,
        Key::LAlt => KeyboardKey::KEY_LEFT_ALT,
        Key::RAlt => KeyboardKey::KEY_RIGHT_ALT,
        Key::F1 => KeyboardKey::KEY_F1,
        Key::F2 => KeyboardKey::KEY_F2,
        Key::F3 => KeyboardKey::KEY_F3,
        Key::F4 => KeyboardKey::KEY_F4,
        Key::F5 => KeyboardKey::KEY_F5,
        Key::F6 => KeyboardKey::KEY_F6,
        Key::F7 => KeyboardKey::KEY_F7,
        Key::F8 => KeyboardKey::KEY_F8,
        Key::F9 => KeyboardKey::KEY_F9,
        Key::F10 => KeyboardKey::KEY_F10,
        Key::F11 => KeyboardKey::KEY_F11,
        Key::F12 => KeyboardKey::KEY_F12,
    }
}

fn raylib_button(button: PointerButton) -> MouseButton {
    match button {
        PointerButton::Left => MouseButton::MOUSE_BUTTON_LEFT,
        PointerButton::Right => MouseButton::MOUSE_BUTTON_RIGHT,
        PointerButton::Middle => MouseButton::MOUSE_BUTTON_MIDDLE,
        PointerButton::XButton1 => MouseButton::MOUSE_BUTTON_SIDE,
        PointerButton::XButton2 => MouseButton::MOUSE_BUTTON_EXTRA,
    }
}
