//! `Surface` over a ratatui buffer.
//!
//! Rects arrive in signed screen coordinates and are clipped to the frame
//! area here. Outlines of at least 2×2 become bordered blocks; thinner rects
//! get bracket marks so one-row dropdown options stay visible.

use crate::core::surface::{Surface, TextRenderer, OPAQUE};
use crate::data::{LabelImage, Rect};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as Area;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Widget};

/// Measure a single-line label in terminal cells
pub fn measure_label(label: &str) -> Option<LabelImage> {
    if label.is_empty() {
        return None;
    }
    let width = Span::raw(label).width() as i32;
    Some(LabelImage::new(label, width, 1))
}

pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Area,
    label_color: Color,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Area) -> Self {
        Self {
            buf,
            area,
            label_color: Color::White,
        }
    }

    /// Intersection of `rect` with the drawable area, if non-empty
    fn clip(&self, rect: Rect) -> Option<Area> {
        let x0 = rect.x.max(i32::from(self.area.x));
        let y0 = rect.y.max(i32::from(self.area.y));
        let x1 = rect.right().min(i32::from(self.area.right()));
        let y1 = rect.bottom().min(i32::from(self.area.bottom()));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Area::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
    }

    fn put(&mut self, x: u16, y: u16, symbol: &str, color: Color) {
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_symbol(symbol).set_fg(color);
        }
    }
}

impl TextRenderer for BufferSurface<'_> {
    fn render_text(&mut self, label: &str) -> Option<LabelImage> {
        measure_label(label)
    }
}

impl Surface for BufferSurface<'_> {
    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool) {
        let Some(area) = self.clip(rect) else {
            return;
        };

        if filled {
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let Some(cell) = self.buf.cell_mut((x, y)) {
                        cell.set_symbol(" ").set_bg(color);
                    }
                }
            }
            return;
        }

        if area.width >= 2 && area.height >= 2 {
            Block::bordered()
                .border_style(Style::default().fg(color))
                .render(area, self.buf);
        } else if area.height == 1 && area.width >= 2 {
            self.put(area.left(), area.top(), "[", color);
            self.put(area.right() - 1, area.top(), "]", color);
        } else if area.width == 1 && area.height >= 2 {
            for y in area.top()..area.bottom() {
                self.put(area.left(), y, "│", color);
            }
        } else {
            self.put(area.left(), area.top(), "▪", color);
        }
    }

    fn draw_image(&mut self, image: &LabelImage, dest: Rect, opacity: u8) {
        if opacity == 0 {
            return;
        }
        let Some(area) = self.clip(dest) else {
            return;
        };

        let mut style = Style::default().fg(self.label_color);
        if opacity < OPAQUE {
            style = style.add_modifier(Modifier::DIM);
        }

        let skip = (i32::from(area.x) - dest.x).max(0) as usize;
        let visible: String = image.text().chars().skip(skip).collect();
        self.buf
            .set_stringn(area.x, area.y, visible, usize::from(area.width), style);
    }
}
