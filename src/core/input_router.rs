//! Input routing for pointer events
//!
//! Translates move/press/release into widget state changes:
//! - hover flags on buttons and dropdowns
//! - drag painting and click toggling on the grid
//! - dropdown open/close/select
//! - button actions (copy, clear, display mode, placeholders)

use super::input_result::InputResult;
use super::widget_manager::{is_eligible, WidgetManager};
use crate::data::{ButtonKind, Dropdown, GridSize, Widget};
use anyhow::Result;

/// Frontend-independent pointer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Move { x: i32, y: i32 },
    /// Primary button pressed
    Down { x: i32, y: i32 },
    /// Primary button released
    Up,
}

/// Pointer state carried between events
#[derive(Debug, Default)]
pub struct InputRouter {
    held: bool,
    previous: Option<(i32, i32)>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary button currently down
    #[cfg(test)]
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Apply one pointer event, then re-lay the grid from the dropdown selection
    pub fn route(&mut self, event: PointerEvent, manager: &mut WidgetManager) -> Result<Vec<InputResult>> {
        let results = match event {
            PointerEvent::Move { x, y } => {
                self.pointer_moved(x, y, manager);
                Vec::new()
            }
            PointerEvent::Down { x, y } => self.pointer_pressed(x, y, manager),
            PointerEvent::Up => {
                self.held = false;
                Vec::new()
            }
        };
        manager.sync_grid_layout()?;
        Ok(results)
    }

    fn pointer_moved(&mut self, x: i32, y: i32, manager: &mut WidgetManager) {
        let masks = manager.masks();
        let previous = self.previous;

        for widget in manager.widgets_mut() {
            match widget {
                Widget::Button(button) => {
                    button.hovered = is_eligible(&button.rect, &masks) && button.rect.contains(x, y);
                }
                Widget::Dropdown(dropdown) => {
                    dropdown.header.hovered = dropdown.header.rect.contains(x, y);
                    if dropdown.open {
                        for option in &mut dropdown.options {
                            option.hovered = option.rect.contains(x, y);
                        }
                    }
                }
                Widget::Grid(grid) => {
                    if !self.held || !is_eligible(&grid.block_rect(), &masks) {
                        continue;
                    }
                    let Some(index) = grid.cell_at(x, y) else {
                        continue;
                    };
                    // Only toggle on entry so dragging inside one cell paints it once
                    let entered = previous.map_or(true, |(px, py)| !grid.cells()[index].rect.contains(px, py));
                    if entered {
                        grid.toggle_cell(index);
                    }
                }
            }
        }

        self.previous = Some((x, y));
    }

    fn pointer_pressed(&mut self, x: i32, y: i32, manager: &mut WidgetManager) -> Vec<InputResult> {
        self.held = true;
        self.previous = Some((x, y));

        // Snapshot before any dropdown closes so one press can't reach through it
        let masks = manager.masks();
        let mut results = Vec::new();

        for index in 0..manager.widgets.len() {
            let clicked = match &mut manager.widgets[index] {
                Widget::Button(button) => {
                    (is_eligible(&button.rect, &masks) && button.rect.contains(x, y)).then_some(button.kind)
                }
                Widget::Dropdown(dropdown) => {
                    if let Some(size) = press_dropdown(dropdown, x, y) {
                        tracing::info!("Board width set to {}", size);
                        results.push(InputResult::GridSizeSelected(size));
                    }
                    None
                }
                Widget::Grid(grid) => {
                    if is_eligible(&grid.block_rect(), &masks) {
                        if let Some(cell) = grid.cell_at(x, y) {
                            grid.toggle_cell(cell);
                        }
                    }
                    None
                }
            };

            if let Some(kind) = clicked {
                if let Some(result) = activate(index, kind, manager) {
                    results.push(result);
                }
            }
        }

        results
    }
}

/// Header toggles the menu; any other press on an open menu closes it and
/// selects whatever option sits under the pointer
fn press_dropdown(dropdown: &mut Dropdown, x: i32, y: i32) -> Option<GridSize> {
    if dropdown.header.rect.contains(x, y) {
        dropdown.open = !dropdown.open;
        return None;
    }
    if !dropdown.open {
        return None;
    }

    dropdown.open = false;
    let picked = dropdown.option_at(x, y);
    for option in &mut dropdown.options {
        option.hovered = false;
    }
    let index = picked?;
    dropdown.selected = index;
    dropdown.selected_grid_size()
}

/// Run a plain button's action
fn activate(index: usize, kind: ButtonKind, manager: &mut WidgetManager) -> Option<InputResult> {
    match kind {
        ButtonKind::Copy => {
            let mode = manager.display_mode().unwrap_or_default();
            let text = manager.format_board(mode)?.to_string();
            Some(InputResult::CopyToClipboard { text })
        }
        ButtonKind::Clear => {
            manager.grid_mut()?.clear();
            tracing::debug!("Board cleared");
            Some(InputResult::Cleared)
        }
        ButtonKind::NumericDisplay(mode) => {
            let next = mode.next();
            if let Some(Widget::Button(button)) = manager.widgets.get_mut(index) {
                button.kind = ButtonKind::NumericDisplay(next);
            }
            Some(InputResult::DisplayModeChanged(next))
        }
        // Options are only reachable through their dropdown
        ButtonKind::GridSize(_) => None,
        ButtonKind::RotateLeft
        | ButtonKind::RotateRight
        | ButtonKind::Flip
        | ButtonKind::Mirror
        | ButtonKind::Move(_) => {
            tracing::debug!("{:?} clicked (no board transformation)", kind);
            Some(InputResult::Unimplemented(kind))
        }
    }
}
