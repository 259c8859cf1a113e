//! Drawing capabilities the core needs from a frontend.
//!
//! The core never talks to a terminal or window directly. It asks a
//! `TextRenderer` to turn labels into [`LabelImage`]s and hands rectangles and
//! images to a `Surface` once per frame.

use crate::data::{LabelImage, Rect};
use ratatui::style::Color;

/// Opacity used for hovered labels (~70%)
pub const HOVER_OPACITY: u8 = 180;

/// Full opacity
pub const OPAQUE: u8 = 255;

/// Turns label text into a reusable rendered image
pub trait TextRenderer {
    /// Returns `None` for an empty label
    fn render_text(&mut self, label: &str) -> Option<LabelImage>;
}

/// Per-frame drawing target
pub trait Surface: TextRenderer {
    /// Outline (`filled == false`) or fill a rectangle
    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool);

    /// Draw a rendered label into `dest` at the given opacity (0-255)
    fn draw_image(&mut self, image: &LabelImage, dest: Rect, opacity: u8);
}
