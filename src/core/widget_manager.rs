//! Owner of every widget plus the shared format buffer.
//!
//! Widgets live in one insertion-ordered list that is walked front to back
//! for both rendering and input. There is no real layering: a plain button or
//! the grid is simply suppressed while any open dropdown's options overlap it.

use crate::data::{BitGrid, Button, ButtonKind, DisplayMode, Dropdown, FormatBuffer, Rect, Widget};
use anyhow::Result;

/// Insertion-ordered widget list
pub struct WidgetManager {
    pub(crate) widgets: Vec<Widget>,
    pub(crate) format_buf: FormatBuffer,
}

impl WidgetManager {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            format_buf: FormatBuffer::new(),
        }
    }

    pub fn add_button(&mut self, button: Button) {
        tracing::trace!("Button {:?} at {:?}", button.kind, button.rect);
        self.push(Widget::Button(button));
    }

    pub fn add_dropdown(&mut self, dropdown: Dropdown) {
        tracing::trace!("Dropdown with {} options", dropdown.options.len());
        self.push(Widget::Dropdown(dropdown));
    }

    pub fn add_grid(&mut self, grid: BitGrid) {
        tracing::trace!("{}x{} grid", grid.rows(), grid.cols());
        self.push(Widget::Grid(grid));
    }

    fn push(&mut self, widget: Widget) {
        tracing::trace!("Adding {} #{}", widget.widget_type(), self.widgets.len());
        self.widgets.push(widget);
    }

    #[cfg(test)]
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut [Widget] {
        &mut self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// First grid in the list
    pub fn grid(&self) -> Option<&BitGrid> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Grid(grid) => Some(grid),
            _ => None,
        })
    }

    pub fn grid_mut(&mut self) -> Option<&mut BitGrid> {
        self.widgets.iter_mut().find_map(|w| match w {
            Widget::Grid(grid) => Some(grid),
            _ => None,
        })
    }

    /// First dropdown in the list
    pub fn dropdown(&self) -> Option<&Dropdown> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Dropdown(dropdown) => Some(dropdown),
            _ => None,
        })
    }

    pub fn dropdown_mut(&mut self) -> Option<&mut Dropdown> {
        self.widgets.iter_mut().find_map(|w| match w {
            Widget::Dropdown(dropdown) => Some(dropdown),
            _ => None,
        })
    }

    /// Mode of the first numeric display button, if there is one
    pub fn display_mode(&self) -> Option<DisplayMode> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Button(Button {
                kind: ButtonKind::NumericDisplay(mode),
                ..
            }) => Some(*mode),
            _ => None,
        })
    }

    /// Board rendered in `mode`, borrowed from the shared buffer
    pub fn format_board(&mut self, mode: DisplayMode) -> Option<&str> {
        let grid = self.widgets.iter().find_map(|w| match w {
            Widget::Grid(grid) => Some(grid),
            _ => None,
        })?;
        Some(grid.state.format(mode, &mut self.format_buf))
    }

    /// Option rects of every open dropdown
    pub fn masks(&self) -> Vec<Rect> {
        self.widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Dropdown(dropdown) => Some(dropdown),
                _ => None,
            })
            .flat_map(|dropdown| dropdown.masking_rects())
            .collect()
    }

    /// Re-lay the grid using the size dropdown's current selection
    ///
    /// Without a size dropdown the grid keeps its current dimensions. A
    /// selection that does not fit the grid bounds is reverted to the current
    /// board size; only a failure at the current size is an error.
    pub fn sync_grid_layout(&mut self) -> Result<()> {
        let requested = self.dropdown().and_then(|d| d.grid_dimensions());
        let Some(grid) = self.grid_mut() else {
            return Ok(());
        };
        let current = (grid.rows(), grid.cols());
        let bounds = grid.bounds();

        let (rows, cols) = requested.unwrap_or(current);
        if (rows, cols) == current {
            return grid.layout(rows, cols, bounds);
        }
        if let Err(e) = grid.layout(rows, cols, bounds) {
            tracing::warn!("Keeping {}x{} board: {:#}", current.0, current.1, e);
            if let Some(dropdown) = self.dropdown_mut() {
                revert_selection(dropdown, current);
            }
        }
        Ok(())
    }

    /// Move the grid region (terminal resize); cell rects follow on the next sync
    pub fn set_grid_bounds(&mut self, bounds: Rect) {
        if let Some(grid) = self.grid_mut() {
            grid.set_bounds(bounds);
        }
    }
}

impl Default for WidgetManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Point the dropdown back at the option matching `(rows, cols)`
fn revert_selection(dropdown: &mut Dropdown, (rows, cols): (usize, usize)) {
    let matching = dropdown.options.iter().position(|option| match option.kind {
        ButtonKind::GridSize(size) => size.rows() == rows && size.cols() == cols,
        _ => false,
    });
    if let Some(index) = matching {
        dropdown.selected = index;
    }
}

/// `rect` may render and take input unless an open dropdown option overlaps it
pub fn is_eligible(rect: &Rect, masks: &[Rect]) -> bool {
    !masks.iter().any(|mask| rect.intersects(mask))
}
