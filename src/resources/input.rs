//! Per-frame physical input resource.
//!
//! [`HeldInputs`] records which keyboard keys and pointer buttons are held
//! down this frame. It is filled from raylib by
//! [`sample_held_inputs`](crate::systems::input::sample_held_inputs) and read
//! by controllers during
//! [`ControllerRegistry::update_all`](crate::resources::controllerregistry::ControllerRegistry::update_all).
//!
//! [`Key`] and [`PointerButton`] are the engine's own names for physical
//! inputs. Both parse from configuration strings case-insensitively, so the
//! lowercased keys produced by INI files map the same as script tables.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;
use std::str::FromStr;

/// Physical keyboard keys a controller can map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    LShift,
    RShift,
    LControl,
    RControl,
    LAlt,
    RAlt,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl Key {
    /// Every key, in declaration order.
    pub const ALL: [Key; 63] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
        Key::Num0,
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Space,
        Key::Enter,
        Key::Escape,
        Key::Tab,
        Key::Backspace,
        Key::LShift,
        Key::RShift,
        Key::LControl,
        Key::RControl,
        Key::LAlt,
        Key::RAlt,
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
    ];
}

impl FromStr for Key {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let key = match name.as_str() {
            "a" => Key::A,
            "b" => Key::B,
            "c" => Key::C,
            "d" => Key::D,
            "e" => Key::E,
            "f" => Key::F,
            "g" => Key::G,
            "h" => Key::H,
            "i" => Key::I,
            "j" => Key::J,
            "k" => Key::K,
            "l" => Key::L,
            "m" => Key::M,
            "n" => Key::N,
            "o" => Key::O,
            "p" => Key::P,
            "q" => Key::Q,
            "r" => Key::R,
            "s" => Key::S,
            "t" => Key::T,
            "u" => Key::U,
            "v" => Key::V,
            "w" => Key::W,
            "x" => Key::X,
            "y" => Key::Y,
            "z" => Key::Z,
            "0" | "num0" => Key::Num0,
            "1" | "num1" => Key::Num1,
            "2" | "num2" => Key::Num2,
            "3" | "num3" => Key::Num3,
            "4" | "num4" => Key::Num4,
            "5" | "num5" => Key::Num5,
            "6" | "num6" => Key::Num6,
            "7" | "num7" => Key::Num7,
            "8" | "num8" => Key::Num8,
            "9" | "num9" => Key::Num9,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "lshift" => Key::LShift,
            "rshift" => Key::RShift,
            "lcontrol" | "lctrl" => Key::LControl,
            "rcontrol" | "rctrl" => Key::RControl,
            "lalt" => Key::LAlt,
            "ralt" => Key::RAlt,
            "f1" => Key::F1,
            "f2" => Key::F2,
            "f3" => Key::F3,
            "f4" => Key::F4,
            "f5" => Key::F5,
            "f6" => Key::F6,
            "f7" => Key::F7,
            "f8" => Key::F8,
            "f9" => Key::F9,
            "f10" => Key::F10,
            "f11" => Key::F11,
            "f12" => Key::F12,
            _ => return Err(()),
        };
        Ok(key)
    }
}

/// Physical pointer (mouse) buttons a controller can map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    XButton1,
    XButton2,
}

impl PointerButton {
    pub const ALL: [PointerButton; 5] = [
        PointerButton::Left,
        PointerButton::Right,
        PointerButton::Middle,
        PointerButton::XButton1,
        PointerButton::XButton2,
    ];
}

impl FromStr for PointerButton {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(PointerButton::Left),
            "right" => Ok(PointerButton::Right),
            "middle" => Ok(PointerButton::Middle),
            "xbutton1" | "side" => Ok(PointerButton::XButton1),
            "xbutton2" | "extra" => Ok(PointerButton::XButton2),
            _ => Err(()),
        }
    }
}

/// Keys and pointer buttons held down during the current frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct HeldInputs {
    keys: FxHashSet<Key>,
    buttons: FxHashSet<PointerButton>,
}

impl HeldInputs {
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_button_down(&self, button: PointerButton) -> bool {
        self.buttons.contains(&button)
    }

    /// Mark `key` as held or released.
    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    /// Mark `button` as held or released.
    pub fn set_button(&mut self, button: PointerButton, down: bool) {
        if down {
            self.buttons.insert(button);
        } else {
            self.buttons.remove(&button);
        }
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }
}
