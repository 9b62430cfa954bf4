//! Input Module
//!
//! Platform-agnostic device state for keyboard and mouse. The window shell
//! feeds raw winit events into a [`DeviceState`]; once per frame it hands
//! the editor a [`FrameInput`] snapshot (held keys, pointer, button levels).
//! Edge detection happens downstream by diffing consecutive snapshots.
//!
//! # Example
//!
//! ```rust
//! use nanoblock_engine::input::{DeviceState, KeyCode, MouseButton};
//!
//! let mut device = DeviceState::new();
//! device.handle_key(KeyCode::W, true);
//! device.set_pointer(100.0, 50.0);
//! device.set_button(MouseButton::Left, true);
//!
//! let frame = device.frame();
//! assert!(frame.is_key_held(KeyCode::W));
//! assert!(frame.buttons.is_pressed(MouseButton::Left));
//! ```

use std::collections::HashSet;

pub mod keyboard;
pub mod mouse;

pub use keyboard::{KeyCode, ModifierState};
pub use mouse::{ButtonState, MouseButton, Position, ScrollDelta};

/// Raw device levels sampled at one frame boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Every key held down right now.
    pub pressed_keys: HashSet<KeyCode>,
    /// Pointer position in window pixels; `None` once the cursor leaves.
    pub pointer: Option<Position>,
    /// Primary/middle/secondary levels.
    pub buttons: ButtonState,
    /// Wheel movement accumulated since the previous frame.
    pub scroll: ScrollDelta,
}

impl FrameInput {
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn modifiers(&self) -> ModifierState {
        ModifierState::from_keys(self.pressed_keys.iter())
    }
}

/// Accumulates winit events between frames.
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    current: FrameInput,
}

impl DeviceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        if pressed {
            self.current.pressed_keys.insert(key);
        } else {
            self.current.pressed_keys.remove(&key);
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.current.pointer = Some(Position::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.current.pointer = None;
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.current.buttons.set(button, pressed);
    }

    pub fn add_scroll(&mut self, delta: ScrollDelta) {
        self.current.scroll.x += delta.x;
        self.current.scroll.y += delta.y;
    }

    /// Snapshot for this frame. Call [`Self::end_frame`] after consuming it.
    pub fn frame(&self) -> FrameInput {
        self.current.clone()
    }

    /// Clear per-frame accumulators (scroll). Levels persist.
    pub fn end_frame(&mut self) {
        self.current.scroll = ScrollDelta::default();
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.current.pressed_keys.clear();
        self.current.buttons.reset();
        self.current.scroll = ScrollDelta::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_state_levels() {
        let mut device = DeviceState::new();
        device.handle_key(KeyCode::Q, true);
        device.handle_key(KeyCode::Unknown, true);
        assert_eq!(device.frame().pressed_keys.len(), 1);

        device.handle_key(KeyCode::Q, false);
        assert!(device.frame().pressed_keys.is_empty());
    }

    #[test]
    fn test_scroll_cleared_at_end_of_frame() {
        let mut device = DeviceState::new();
        device.add_scroll(ScrollDelta::from_lines(0.0, 1.0));
        device.add_scroll(ScrollDelta::from_lines(0.0, 2.0));
        assert_eq!(device.frame().scroll.y, 3.0);

        device.set_button(MouseButton::Middle, true);
        device.end_frame();
        let frame = device.frame();
        assert!(frame.scroll.is_zero());
        assert!(frame.buttons.is_pressed(MouseButton::Middle));
    }

    #[test]
    fn test_pointer_leaves() {
        let mut device = DeviceState::new();
        device.set_pointer(3.0, 4.0);
        assert_eq!(device.frame().pointer, Some(Position::new(3.0, 4.0)));
        device.clear_pointer();
        assert_eq!(device.frame().pointer, None);
    }

    #[test]
    fn test_reset_releases_all() {
        let mut device = DeviceState::new();
        device.handle_key(KeyCode::ControlLeft, true);
        device.set_button(MouseButton::Left, true);
        assert!(device.frame().modifiers().ctrl);
        device.reset();
        let frame = device.frame();
        assert!(frame.pressed_keys.is_empty());
        assert!(!frame.buttons.any_pressed());
    }
}
