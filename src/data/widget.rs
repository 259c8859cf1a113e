//! Widget data structures - state for every widget type
//!
//! These are pure data structures with NO rendering logic.
//! The render pass in `core::render` reads them and issues draw calls.

use super::geometry::Rect;
use super::grid::BitGrid;
use super::DisplayMode;
use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;

/// A label already rendered by the platform, with its size
///
/// Owned by exactly one button; dropping it releases it.
#[derive(Debug, PartialEq, Eq)]
pub struct LabelImage {
    text: String,
    width: i32,
    height: i32,
}

impl LabelImage {
    pub fn new(text: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            text: text.into(),
            width,
            height,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// Compass direction for the shift placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        }
    }
}

/// Board widths offered by the size dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSize {
    Bits8,
    Bits16,
    Bits32,
    Bits64,
    Bits128,
}

impl GridSize {
    /// Dropdown order
    pub const ALL: [GridSize; 5] = [
        GridSize::Bits8,
        GridSize::Bits16,
        GridSize::Bits32,
        GridSize::Bits64,
        GridSize::Bits128,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GridSize::Bits8 => "8-Bit",
            GridSize::Bits16 => "16-Bit",
            GridSize::Bits32 => "32-Bit",
            GridSize::Bits64 => "64-Bit",
            GridSize::Bits128 => "128-Bit",
        }
    }

    /// Rows double through 64 bits; 128 bits widens to 16 columns instead
    pub fn rows(self) -> usize {
        match self {
            GridSize::Bits8 => 1,
            GridSize::Bits16 => 2,
            GridSize::Bits32 => 4,
            GridSize::Bits64 | GridSize::Bits128 => 8,
        }
    }

    pub fn cols(self) -> usize {
        match self {
            GridSize::Bits128 => 16,
            _ => 8,
        }
    }

    pub fn bits(self) -> usize {
        self.rows() * self.cols()
    }

    /// Position in [`GridSize::ALL`]
    pub fn index(self) -> usize {
        match self {
            GridSize::Bits8 => 0,
            GridSize::Bits16 => 1,
            GridSize::Bits32 => 2,
            GridSize::Bits64 => 3,
            GridSize::Bits128 => 4,
        }
    }
}

impl FromStr for GridSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let digits = normalized.trim_end_matches("-bit").trim_end_matches("bit");
        GridSize::ALL
            .into_iter()
            .find(|size| size.bits().to_string() == digits)
            .ok_or_else(|| anyhow::anyhow!("Unknown board width '{}' (expected 8, 16, 32, 64 or 128)", s))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a button is and what clicking it does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Copy,
    Clear,
    RotateLeft,
    RotateRight,
    Flip,
    Mirror,
    Move(Direction),
    /// Numeric readout of the board; the mode cycles on click
    NumericDisplay(DisplayMode),
    /// Option inside the board size dropdown
    GridSize(GridSize),
}

impl ButtonKind {
    /// Static caption; the numeric display is drawn from board state instead
    pub fn caption(self) -> &'static str {
        match self {
            ButtonKind::Copy => "Copy",
            ButtonKind::Clear => "Clear",
            ButtonKind::RotateLeft => "RL",
            ButtonKind::RotateRight => "RR",
            ButtonKind::Flip => "Flip",
            ButtonKind::Mirror => "Mirror",
            ButtonKind::Move(direction) => direction.label(),
            ButtonKind::NumericDisplay(_) => "",
            ButtonKind::GridSize(size) => size.label(),
        }
    }
}

/// Clickable rectangle with an optional cached label
#[derive(Debug)]
pub struct Button {
    pub rect: Rect,
    pub color: Color,
    pub label: Option<LabelImage>,
    pub hovered: bool,
    pub kind: ButtonKind,
}

impl Button {
    pub fn new(kind: ButtonKind, rect: Rect, color: Color, label: Option<LabelImage>) -> Self {
        Self {
            rect,
            color,
            label,
            hovered: false,
            kind,
        }
    }

    /// Swap in a freshly rendered label; the old one is dropped
    pub fn replace_label(&mut self, label: Option<LabelImage>) {
        self.label = label;
    }
}

/// Drop-down selector: a header plus vertically stacked options
#[derive(Debug)]
pub struct Dropdown {
    pub header: Button,
    pub options: Vec<Button>,
    pub open: bool,
    pub selected: usize,
}

impl Dropdown {
    pub fn new(header: Button, options: Vec<Button>, selected: usize) -> Self {
        let selected = selected.min(options.len().saturating_sub(1));
        Self {
            header,
            options,
            open: false,
            selected,
        }
    }

    pub fn selected_option(&self) -> Option<&Button> {
        self.options.get(self.selected)
    }

    /// Board size chosen by the current selection, if this is a size dropdown
    pub fn selected_grid_size(&self) -> Option<GridSize> {
        match self.selected_option()?.kind {
            ButtonKind::GridSize(size) => Some(size),
            _ => None,
        }
    }

    /// `(rows, cols)` the grid should use for the current selection
    pub fn grid_dimensions(&self) -> Option<(usize, usize)> {
        self.selected_grid_size().map(|size| (size.rows(), size.cols()))
    }

    pub fn option_at(&self, x: i32, y: i32) -> Option<usize> {
        self.options.iter().position(|option| option.rect.contains(x, y))
    }

    /// Option rects that currently mask widgets underneath (empty when closed)
    pub fn masking_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.options
            .iter()
            .filter(move |_| self.open)
            .map(|option| option.rect)
    }
}

/// Every item the UI holds, in insertion (z-)order
#[derive(Debug)]
pub enum Widget {
    Button(Button),
    Dropdown(Dropdown),
    Grid(BitGrid),
}

impl Widget {
    pub fn widget_type(&self) -> &'static str {
        match self {
            Widget::Button(_) => "button",
            Widget::Dropdown(_) => "dropdown",
            Widget::Grid(_) => "grid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(size: GridSize, y: i32) -> Button {
        Button::new(
            ButtonKind::GridSize(size),
            Rect::new(0, y, 10, 2),
            Color::White,
            Some(LabelImage::new(size.label(), size.label().len() as i32, 1)),
        )
    }

    fn size_dropdown(selected: usize) -> Dropdown {
        let header = Button::new(ButtonKind::GridSize(GridSize::Bits64), Rect::new(0, 0, 10, 4), Color::White, None);
        let options = GridSize::ALL
            .iter()
            .enumerate()
            .map(|(i, size)| option(*size, 5 + 3 * i as i32))
            .collect();
        Dropdown::new(header, options, selected)
    }

    #[test]
    fn test_grid_size_dimensions() {
        let dims: Vec<_> = GridSize::ALL.iter().map(|s| (s.rows(), s.cols())).collect();
        assert_eq!(dims, vec![(1, 8), (2, 8), (4, 8), (8, 8), (8, 16)]);
        for (i, size) in GridSize::ALL.iter().enumerate() {
            assert_eq!(size.index(), i);
        }
        assert_eq!(GridSize::Bits128.bits(), 128);
    }

    #[test]
    fn test_grid_size_parse() {
        assert_eq!("64-bit".parse::<GridSize>().unwrap(), GridSize::Bits64);
        assert_eq!("128-Bit".parse::<GridSize>().unwrap(), GridSize::Bits128);
        assert_eq!("8".parse::<GridSize>().unwrap(), GridSize::Bits8);
        assert!("12-bit".parse::<GridSize>().is_err());
    }

    #[test]
    fn test_dropdown_selection_and_masks() {
        let mut dd = size_dropdown(3);
        assert_eq!(dd.grid_dimensions(), Some((8, 8)));
        assert_eq!(dd.masking_rects().count(), 0);

        dd.open = true;
        assert_eq!(dd.masking_rects().count(), 5);
        assert_eq!(dd.option_at(3, 17), Some(4));
        assert_eq!(dd.option_at(30, 17), None);

        dd.selected = 4;
        assert_eq!(dd.grid_dimensions(), Some((8, 16)));
        assert_eq!(dd.selected_option().and_then(|o| o.label.as_ref()).map(|l| l.text()), Some("128-Bit"));
    }

    #[test]
    fn test_dropdown_clamps_selection() {
        let dd = size_dropdown(42);
        assert_eq!(dd.selected, 4);
    }

    #[test]
    fn test_replace_label() {
        let mut b = Button::new(ButtonKind::Copy, Rect::new(0, 0, 6, 3), Color::Red, None);
        assert!(b.label.is_none());
        b.replace_label(Some(LabelImage::new("Copy", 4, 1)));
        assert_eq!(b.label.as_ref().map(|l| l.size()), Some((4, 1)));
        b.replace_label(None);
        assert!(b.label.is_none());
    }
}
