//! Input Handler
//!
//! Turns per-frame device levels into edits. Each call to
//! [`InputHandler::update`] runs four steps in a fixed order:
//!
//! 1. diff held keys against the previous frame into key-down/key-up events
//! 2. hit-test the pointer against the 2D layer panels, top-most layer
//!    first, and store the hovered cell (cleared when nothing matches)
//! 3. diff mouse button levels into button-down/button-up events
//! 4. dispatch key events, then button events
//!
//! Nothing here fails: edits on an absent hover or an invalid target are
//! silent no-ops.

use std::collections::HashSet;

use crate::editor::config::{InputConfig, KeyCommand, LayoutConfig};
use crate::editor::model::{Coord3, Model, Piece, Size2};
use crate::editor::palette::ColorRegistry;
use crate::input::{FrameInput, KeyCode, ModifierState, MouseButton, Position};

/// Edge event synthesized by diffing two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
}

/// Everything an update may touch.
pub struct EditContext<'a> {
    pub model: &'a mut Model,
    pub brush: &'a mut Piece,
    pub registry: &'a ColorRegistry,
    pub layout: &'a LayoutConfig,
}

/// What happened during one update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOutcome {
    /// Every synthesized edge, in dispatch order.
    pub events: Vec<InputEvent>,
    /// The model was edited.
    pub model_changed: bool,
    /// Ctrl+S was pressed.
    pub save_requested: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    bindings: InputConfig,
    previous_keys: HashSet<KeyCode>,
    previous_buttons: [bool; 3],
    hover: Option<Coord3>,
}

impl InputHandler {
    pub fn new(bindings: InputConfig) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Cell under the pointer after the last update.
    pub fn hover(&self) -> Option<Coord3> {
        self.hover
    }

    pub fn update(&mut self, frame: &FrameInput, ctx: &mut EditContext<'_>) -> InputOutcome {
        // 1. keys
        let mut events = self.diff_keys(&frame.pressed_keys);

        // 2. hover
        self.hover = frame
            .pointer
            .and_then(|p| hover_cell(ctx.layout, ctx.model, p));

        // 3. buttons
        events.extend(self.diff_buttons(frame.buttons.0));

        // 4. dispatch
        let modifiers = frame.modifiers();
        let mut outcome = InputOutcome::default();
        for &event in &events {
            match event {
                InputEvent::KeyDown(key) => self.on_key_down(key, modifiers, ctx, &mut outcome),
                InputEvent::ButtonDown(button) => self.on_button_down(button, ctx, &mut outcome),
                InputEvent::KeyUp(_) | InputEvent::ButtonUp(_) => {}
            }
        }
        outcome.events = events;
        outcome
    }

    fn diff_keys(&mut self, current: &HashSet<KeyCode>) -> Vec<InputEvent> {
        let mut downs: Vec<KeyCode> = current.difference(&self.previous_keys).copied().collect();
        let mut ups: Vec<KeyCode> = self.previous_keys.difference(current).copied().collect();
        // HashSet order is arbitrary; keep dispatch stable across runs.
        downs.sort_unstable();
        ups.sort_unstable();
        self.previous_keys.clone_from(current);

        ups.into_iter()
            .map(InputEvent::KeyUp)
            .chain(downs.into_iter().map(InputEvent::KeyDown))
            .collect()
    }

    fn diff_buttons(&mut self, current: [bool; 3]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for button in MouseButton::ALL {
            let i = button as usize;
            match (self.previous_buttons[i], current[i]) {
                (false, true) => events.push(InputEvent::ButtonDown(button)),
                (true, false) => events.push(InputEvent::ButtonUp(button)),
                _ => {}
            }
        }
        self.previous_buttons = current;
        events
    }

    fn on_key_down(
        &self,
        key: KeyCode,
        modifiers: ModifierState,
        ctx: &mut EditContext<'_>,
        outcome: &mut InputOutcome,
    ) {
        let Some(command) = self.bindings.command_for(key, modifiers) else {
            return;
        };
        let brush = &mut *ctx.brush;
        let size = brush.size();
        match command {
            KeyCommand::GrowWidth => brush.resize(Size2::new(size.width + 1, size.height)),
            KeyCommand::ShrinkWidth => brush.resize(Size2::new(size.width - 1, size.height)),
            KeyCommand::GrowHeight => brush.resize(Size2::new(size.width, size.height + 1)),
            KeyCommand::ShrinkHeight => brush.resize(Size2::new(size.width, size.height - 1)),
            KeyCommand::CycleStuds => brush.studs = brush.studs.cycled(),
            KeyCommand::ToggleShape => brush.shape = brush.shape.toggled(),
            KeyCommand::SelectColor(slot) => match ctx.registry.nth(slot) {
                Some(color) => brush.dye(color),
                None => log::debug!("No color at registry position {}", slot),
            },
            KeyCommand::AddLayerOnTop => {
                ctx.model.add_layer_on_top();
                outcome.model_changed = true;
            }
            KeyCommand::Shift(direction) => {
                ctx.model.shift(direction);
                outcome.model_changed = true;
            }
            KeyCommand::Save => outcome.save_requested = true,
        }
        log::debug!("{:?} -> brush {:?}", command, ctx.brush);
    }

    fn on_button_down(
        &self,
        button: MouseButton,
        ctx: &mut EditContext<'_>,
        outcome: &mut InputOutcome,
    ) {
        match button {
            MouseButton::Left => {
                if let Some(hover) = self.hover {
                    toggle_piece(ctx.model, ctx.brush, hover);
                    outcome.model_changed = true;
                }
            }
            MouseButton::Right => ctx.brush.swap_size(),
            // Middle drives the camera, handled by the session.
            MouseButton::Middle => {}
        }
    }
}

/// Remove the piece covering `at`, or place a copy of `brush` there.
pub fn toggle_piece(model: &mut Model, brush: &Piece, at: Coord3) {
    match model.locate(at) {
        Some(handle) => {
            model.remove(handle);
            log::debug!("Removed piece at {:?}", at);
        }
        None => {
            model.add_piece(at.layer, brush.moved_to(at.xy()));
            log::debug!("Placed {:?} at {:?}", brush.size(), at);
        }
    }
}

/// Layer cell under `pointer`, scanning panels from the top-most layer.
pub fn hover_cell(layout: &LayoutConfig, model: &Model, pointer: Position) -> Option<Coord3> {
    let last = model.last_layer_index()?;
    (0..model.layer_count()).find_map(|slot| {
        let rect = layout.panel_rect(slot);
        rect.contains(pointer).then(|| {
            layout
                .cell_in(rect, pointer)
                .on_layer(layout.layer_for_slot(slot, last))
        })
    })
}
