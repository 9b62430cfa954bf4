//! Mouse Input Module
//!
//! Pointer position, the three tracked buttons and scroll wheel.
//! Decoupled from winit to use generic types.

/// Mouse buttons tracked by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (place/erase)
    Left = 0,
    /// Middle button (camera orbit)
    Middle = 1,
    /// Secondary button (swap brush footprint)
    Right = 2,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

    /// Translate a winit button; extra buttons are not tracked.
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// Down/up state of the three buttons, indexed by [`MouseButton`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState(pub [bool; 3]);

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        self.0[button as usize] = pressed;
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.0[button as usize]
    }

    pub fn any_pressed(&self) -> bool {
        self.0.iter().any(|&b| b)
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 2D position in screen pixels, origin top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Scroll wheel delta in line units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollDelta {
    pub x: f32,
    pub y: f32,
}

impl ScrollDelta {
    pub fn from_lines(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Normalizes by dividing by 100 to get approximate line equivalents.
    pub fn from_pixels(x: f64, y: f64) -> Self {
        Self {
            x: (x / 100.0) as f32,
            y: (y / 100.0) as f32,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}
