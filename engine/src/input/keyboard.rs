//! Keyboard Input Module
//!
//! Generic key codes used by the editor, decoupled from the windowing
//! system. `from_winit` is the single translation point.

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyCode {
    // Letter keys
    A,
    E,
    Q,
    R,
    S,
    T,
    W,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Number keys
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Control keys
    Escape,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Translate a winit physical key code.
    pub fn from_winit(code: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as W;
        match code {
            W::KeyA => KeyCode::A,
            W::KeyE => KeyCode::E,
            W::KeyQ => KeyCode::Q,
            W::KeyR => KeyCode::R,
            W::KeyS => KeyCode::S,
            W::KeyT => KeyCode::T,
            W::KeyW => KeyCode::W,
            W::ArrowUp => KeyCode::ArrowUp,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight,
            W::Digit0 | W::Numpad0 => KeyCode::Digit0,
            W::Digit1 | W::Numpad1 => KeyCode::Digit1,
            W::Digit2 | W::Numpad2 => KeyCode::Digit2,
            W::Digit3 | W::Numpad3 => KeyCode::Digit3,
            W::Digit4 | W::Numpad4 => KeyCode::Digit4,
            W::Digit5 | W::Numpad5 => KeyCode::Digit5,
            W::Digit6 | W::Numpad6 => KeyCode::Digit6,
            W::Digit7 | W::Numpad7 => KeyCode::Digit7,
            W::Digit8 | W::Numpad8 => KeyCode::Digit8,
            W::Digit9 | W::Numpad9 => KeyCode::Digit9,
            W::Escape => KeyCode::Escape,
            W::ShiftLeft => KeyCode::ShiftLeft,
            W::ShiftRight => KeyCode::ShiftRight,
            W::ControlLeft => KeyCode::ControlLeft,
            W::ControlRight => KeyCode::ControlRight,
            _ => KeyCode::Unknown,
        }
    }

    /// Numeric value of a digit key.
    pub fn digit(self) -> Option<u8> {
        match self {
            KeyCode::Digit0 => Some(0),
            KeyCode::Digit1 => Some(1),
            KeyCode::Digit2 => Some(2),
            KeyCode::Digit3 => Some(3),
            KeyCode::Digit4 => Some(4),
            KeyCode::Digit5 => Some(5),
            KeyCode::Digit6 => Some(6),
            KeyCode::Digit7 => Some(7),
            KeyCode::Digit8 => Some(8),
            KeyCode::Digit9 => Some(9),
            _ => None,
        }
    }

    pub fn is_control(self) -> bool {
        matches!(self, KeyCode::ControlLeft | KeyCode::ControlRight)
    }

    pub fn is_shift(self) -> bool {
        matches!(self, KeyCode::ShiftLeft | KeyCode::ShiftRight)
    }
}

/// State of keyboard modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub shift: bool,
    pub ctrl: bool,
}

impl ModifierState {
    /// Derive modifier state from a set of held keys.
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a KeyCode>) -> Self {
        keys.into_iter().fold(Self::default(), |mut m, k| {
            m.shift |= k.is_shift();
            m.ctrl |= k.is_control();
            m
        })
    }

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl
    }
}
