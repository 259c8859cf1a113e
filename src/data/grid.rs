//! Bit grid: cell geometry over a rectangular region plus the board value.
//!
//! Cells are square, separated by one unit of padding, and the whole block is
//! centered inside the grid bounds. Any change of rows or columns reallocates
//! the cells and wipes the board.

use super::bit_state::BitState;
use super::geometry::Rect;
use anyhow::{bail, Result};
use ratatui::style::Color;

/// Gap between adjacent cells
pub const CELL_PADDING: i32 = 1;

/// A single board cell
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    /// Cell is painted (bit set)
    pub on: bool,
    /// Screen rect, recomputed by every `layout` call
    pub rect: Rect,
    pub color: Color,
}

impl GridCell {
    fn blank(color: Color) -> Self {
        Self {
            on: false,
            rect: Rect::default(),
            color,
        }
    }
}

/// Grid widget state: layout parameters, cells and the board value
#[derive(Clone, Debug)]
pub struct BitGrid {
    rows: usize,
    cols: usize,
    pub state: BitState,
    cells: Vec<GridCell>,
    bounds: Rect,
    cell_size: i32,
    cell_color: Color,
}

impl BitGrid {
    /// Allocate a zeroed `rows × cols` grid; cell rects stay empty until `layout`
    pub fn new(rows: usize, cols: usize, bounds: Rect, cell_color: Color) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            state: BitState::new((rows * cols) as u32),
            cells: vec![GridCell::blank(cell_color); rows * cols],
            bounds,
            cell_size: 0,
            cell_color,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    #[cfg(test)]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Lay the grid out as `rows × cols` inside `bounds`
    ///
    /// A dimension change reallocates the cells and clears the board. Fails
    /// when the bounds cannot fit a single unit-sized cell per row/column,
    /// leaving the grid untouched.
    pub fn layout(&mut self, rows: usize, cols: usize, bounds: Rect) -> Result<()> {
        let rows = rows.max(1);
        let cols = cols.max(1);

        let width_fit = bounds.w / cols as i32 - CELL_PADDING;
        let height_fit = bounds.h / rows as i32 - CELL_PADDING;
        let size = width_fit.min(height_fit);
        if size <= 0 {
            bail!(
                "Grid area {}x{} is too small for a {}x{} board",
                bounds.w,
                bounds.h,
                rows,
                cols
            );
        }

        if rows != self.rows || cols != self.cols {
            tracing::debug!(
                "Grid resized {}x{} -> {}x{}, clearing board",
                self.rows,
                self.cols,
                rows,
                cols
            );
            self.cells = vec![GridCell::blank(self.cell_color); rows * cols];
            self.state = BitState::new((rows * cols) as u32);
            self.rows = rows;
            self.cols = cols;
        }
        self.bounds = bounds;
        self.cell_size = size;

        let stride = size + CELL_PADDING;
        let origin_x = bounds.x + (bounds.w - stride * cols as i32) / 2;
        let origin_y = bounds.y + (bounds.h - stride * rows as i32) / 2;

        for (i, cell) in self.cells.iter_mut().enumerate() {
            let row = (i / cols) as i32;
            let col = (i % cols) as i32;
            cell.rect = Rect::new(origin_x + stride * col, origin_y + stride * row, size, size);
        }

        Ok(())
    }

    /// Bounding rect of the laid-out cell block
    pub fn block_rect(&self) -> Rect {
        match (self.cells.first(), self.cells.last()) {
            (Some(first), Some(last)) => Rect::new(
                first.rect.x,
                first.rect.y,
                last.rect.right() - first.rect.x,
                last.rect.bottom() - first.rect.y,
            ),
            _ => Rect::default(),
        }
    }

    /// Index of the cell containing the point, if any
    pub fn cell_at(&self, x: i32, y: i32) -> Option<usize> {
        self.cells.iter().position(|cell| cell.rect.contains(x, y))
    }

    /// Flip a cell and its bit together
    pub fn toggle_cell(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.on = !cell.on;
            self.state.toggle_bit(index);
        }
    }

    /// Zero the board and switch every cell off
    pub fn clear(&mut self) {
        self.state.clear();
        for cell in &mut self.cells {
            cell.on = false;
        }
    }
}
