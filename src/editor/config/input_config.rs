//! Input Configuration
//!
//! Defines all key bindings as a data structure and maps a key-down edge
//! to the editor command it triggers. Digit keys are not listed here:
//! they always select colors by registry position.

use crate::editor::model::Direction;
use crate::input::{KeyCode, ModifierState};

/// Command produced by a key-down edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    GrowWidth,
    ShrinkWidth,
    GrowHeight,
    ShrinkHeight,
    AddLayerOnTop,
    Shift(Direction),
    /// Registry position selected by a digit key.
    SelectColor(usize),
    CycleStuds,
    ToggleShape,
    Save,
}

/// Brush footprint bindings.
#[derive(Clone, Debug)]
pub struct BrushBindings {
    pub grow_width: KeyCode,
    pub shrink_width: KeyCode,
    pub grow_height: KeyCode,
    pub shrink_height: KeyCode,
    pub cycle_studs: KeyCode,
    pub toggle_shape: KeyCode,
}

/// Whole-model nudge bindings (arrow keys).
#[derive(Clone, Debug)]
pub struct ShiftBindings {
    pub north: KeyCode,
    pub east: KeyCode,
    pub south: KeyCode,
    pub west: KeyCode,
}

/// Centralized input configuration containing all key bindings.
#[derive(Clone, Debug)]
pub struct InputConfig {
    pub brush: BrushBindings,
    pub shift: ShiftBindings,
    pub add_layer: KeyCode,
    /// Combined with Ctrl.
    pub save: KeyCode,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            brush: BrushBindings {
                grow_width: KeyCode::W,
                shrink_width: KeyCode::Q,
                grow_height: KeyCode::S,
                shrink_height: KeyCode::A,
                cycle_studs: KeyCode::T,
                toggle_shape: KeyCode::E,
            },
            shift: ShiftBindings {
                north: KeyCode::ArrowUp,
                east: KeyCode::ArrowRight,
                south: KeyCode::ArrowDown,
                west: KeyCode::ArrowLeft,
            },
            add_layer: KeyCode::R,
            save: KeyCode::S,
        }
    }
}

impl InputConfig {
    /// Registry position for a digit key: 1-9 select the first nine colors,
    /// 0 selects the tenth.
    pub fn color_slot(key: KeyCode) -> Option<usize> {
        key.digit().map(|d| match d {
            0 => 9,
            n => n as usize - 1,
        })
    }

    /// Command bound to `key`, if any. With Ctrl held only shortcuts match,
    /// so Ctrl+S saves without also growing the brush.
    pub fn command_for(&self, key: KeyCode, modifiers: ModifierState) -> Option<KeyCommand> {
        if modifiers.ctrl {
            return (key == self.save).then_some(KeyCommand::Save);
        }

        if let Some(slot) = Self::color_slot(key) {
            return Some(KeyCommand::SelectColor(slot));
        }

        let b = &self.brush;
        let s = &self.shift;
        let command = match key {
            k if k == b.grow_width => KeyCommand::GrowWidth,
            k if k == b.shrink_width => KeyCommand::ShrinkWidth,
            k if k == b.grow_height => KeyCommand::GrowHeight,
            k if k == b.shrink_height => KeyCommand::ShrinkHeight,
            k if k == b.cycle_studs => KeyCommand::CycleStuds,
            k if k == b.toggle_shape => KeyCommand::ToggleShape,
            k if k == self.add_layer => KeyCommand::AddLayerOnTop,
            k if k == s.north => KeyCommand::Shift(Direction::North),
            k if k == s.east => KeyCommand::Shift(Direction::East),
            k if k == s.south => KeyCommand::Shift(Direction::South),
            k if k == s.west => KeyCommand::Shift(Direction::West),
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_slot_mapping() {
        assert_eq!(InputConfig::color_slot(KeyCode::Digit1), Some(0));
        assert_eq!(InputConfig::color_slot(KeyCode::Digit9), Some(8));
        assert_eq!(InputConfig::color_slot(KeyCode::Digit0), Some(9));
        assert_eq!(InputConfig::color_slot(KeyCode::W), None);
    }

    #[test]
    fn test_default_bindings() {
        let config = InputConfig::default();
        let none = ModifierState::default();
        assert_eq!(config.command_for(KeyCode::W, none), Some(KeyCommand::GrowWidth));
        assert_eq!(config.command_for(KeyCode::A, none), Some(KeyCommand::ShrinkHeight));
        assert_eq!(config.command_for(KeyCode::R, none), Some(KeyCommand::AddLayerOnTop));
        assert_eq!(
            config.command_for(KeyCode::ArrowLeft, none),
            Some(KeyCommand::Shift(Direction::West))
        );
        assert_eq!(config.command_for(KeyCode::Escape, none), None);
    }

    #[test]
    fn test_ctrl_only_matches_shortcuts() {
        let config = InputConfig::default();
        let ctrl = ModifierState {
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(config.command_for(KeyCode::S, ctrl), Some(KeyCommand::Save));
        assert_eq!(config.command_for(KeyCode::W, ctrl), None);
        assert_eq!(config.command_for(KeyCode::Digit1, ctrl), None);
    }
}
