//! Per-frame draw pass over the widget list.
//!
//! Widgets are drawn in insertion order. Buttons and the grid are skipped
//! while an open dropdown's options overlap them; dropdowns themselves are
//! never suppressed.

use super::surface::{Surface, HOVER_OPACITY, OPAQUE};
use super::widget_manager::{is_eligible, WidgetManager};
use crate::data::{BitState, Button, ButtonKind, DisplayMode, FormatBuffer, LabelImage, Rect, Widget};

/// Draw every eligible widget onto `surface`
pub fn render_frame<S: Surface>(manager: &mut WidgetManager, surface: &mut S) {
    let masks = manager.masks();
    let board = manager.grid().map(|grid| grid.state.clone());
    let WidgetManager { widgets, format_buf } = manager;

    for widget in widgets.iter_mut() {
        match widget {
            Widget::Button(button) => {
                if !is_eligible(&button.rect, &masks) {
                    continue;
                }
                if let (ButtonKind::NumericDisplay(mode), Some(state)) = (button.kind, board.as_ref()) {
                    refresh_readout(button, state, mode, format_buf, surface);
                }
                draw_button(surface, button, button.label.as_ref());
            }
            Widget::Dropdown(dropdown) => {
                let selected = dropdown.selected_option().and_then(|o| o.label.as_ref());
                draw_button(surface, &dropdown.header, selected);
                if dropdown.open {
                    for option in &dropdown.options {
                        draw_button(surface, option, option.label.as_ref());
                    }
                }
            }
            Widget::Grid(grid) => {
                if !is_eligible(&grid.block_rect(), &masks) {
                    continue;
                }
                for cell in grid.cells() {
                    surface.draw_rect(cell.rect, cell.color, cell.on);
                }
            }
        }
    }
}

/// Draw only `text`, centered on a `width × height` screen
pub fn render_notice<S: Surface>(surface: &mut S, width: u16, height: u16, text: &str) {
    if let Some(label) = surface.render_text(text) {
        let (w, h) = label.size();
        let screen = Rect::new(0, 0, i32::from(width), i32::from(height));
        surface.draw_image(&label, screen.centered(w, h), OPAQUE);
    }
}

/// Re-render the readout label from the board and fit the rect to it
fn refresh_readout<S: Surface>(
    button: &mut Button,
    state: &BitState,
    mode: DisplayMode,
    buf: &mut FormatBuffer,
    surface: &mut S,
) {
    let label = surface.render_text(state.format(mode, buf));
    if let Some(label) = &label {
        let (w, h) = label.size();
        button.rect.w = w;
        button.rect.h = h;
    }
    button.replace_label(label);
}

/// Outline, then the label centered at hover-dependent opacity
fn draw_button<S: Surface>(surface: &mut S, button: &Button, label: Option<&LabelImage>) {
    surface.draw_rect(button.rect, button.color, false);
    if let Some(label) = label {
        let (w, h) = label.size();
        let opacity = if button.hovered { HOVER_OPACITY } else { OPAQUE };
        surface.draw_image(label, button.rect.centered(w, h), opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::TextRenderer;
    use crate::data::{BitGrid, Dropdown, GridSize};
    use ratatui::style::Color;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect { rect: Rect, filled: bool },
        Image { text: String, dest: Rect, opacity: u8 },
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn images(&self) -> Vec<(&str, u8)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Image { text, opacity, .. } => Some((text.as_str(), *opacity)),
                    _ => None,
                })
                .collect()
        }

        fn drew_rect(&self, target: Rect) -> bool {
            self.ops
                .iter()
                .any(|op| matches!(op, Op::Rect { rect, .. } if *rect == target))
        }

        fn filled_count(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Rect { filled: true, .. }))
                .count()
        }
    }

    impl TextRenderer for RecordingSurface {
        fn render_text(&mut self, label: &str) -> Option<LabelImage> {
            (!label.is_empty()).then(|| LabelImage::new(label, label.len() as i32, 1))
        }
    }

    impl Surface for RecordingSurface {
        fn draw_rect(&mut self, rect: Rect, _color: Color, filled: bool) {
            self.ops.push(Op::Rect { rect, filled });
        }

        fn draw_image(&mut self, image: &LabelImage, dest: Rect, opacity: u8) {
            self.ops.push(Op::Image {
                text: image.text().to_string(),
                dest,
                opacity,
            });
        }
    }

    const COPY_RECT: Rect = Rect::new(0, 6, 10, 3);

    fn fixture() -> WidgetManager {
        let mut manager = WidgetManager::new();
        manager.add_grid(BitGrid::new(8, 8, Rect::new(20, 0, 900, 700), Color::White));
        manager.add_button(Button::new(
            ButtonKind::NumericDisplay(DisplayMode::Hex),
            Rect::new(200, 710, 20, 1),
            Color::White,
            None,
        ));
        let header = Button::new(
            ButtonKind::GridSize(GridSize::Bits64),
            Rect::new(0, 0, 10, 4),
            Color::White,
            None,
        );
        let options = GridSize::ALL
            .iter()
            .enumerate()
            .map(|(i, size)| {
                let kind = ButtonKind::GridSize(*size);
                let label = LabelImage::new(kind.caption(), kind.caption().len() as i32, 1);
                Button::new(kind, Rect::new(0, 5 + 3 * i as i32, 10, 2), Color::White, Some(label))
            })
            .collect();
        manager.add_dropdown(Dropdown::new(header, options, GridSize::Bits64.index()));
        manager.add_button(Button::new(
            ButtonKind::Copy,
            COPY_RECT,
            Color::White,
            Some(LabelImage::new("Copy", 4, 1)),
        ));
        manager.sync_grid_layout().unwrap();
        manager
    }

    #[test]
    fn test_closed_frame_draws_everything() {
        let mut manager = fixture();
        let mut surface = RecordingSurface::default();
        render_frame(&mut manager, &mut surface);

        assert!(surface.drew_rect(COPY_RECT));
        assert_eq!(surface.filled_count(), 0);
        let images = surface.images();
        assert!(images.contains(&("0x0", OPAQUE)));
        assert!(images.contains(&("64-Bit", OPAQUE)));
        assert!(images.contains(&("Copy", OPAQUE)));
        // options stay hidden while closed
        assert!(!images.contains(&("8-Bit", OPAQUE)));
    }

    #[test]
    fn test_open_dropdown_suppresses_overlapped_widgets() {
        let mut manager = fixture();
        manager.dropdown_mut().unwrap().open = true;
        let mut surface = RecordingSurface::default();
        render_frame(&mut manager, &mut surface);

        assert!(!surface.drew_rect(COPY_RECT));
        let images = surface.images();
        assert!(!images.iter().any(|(text, _)| *text == "Copy"));
        for size in GridSize::ALL {
            assert!(images.contains(&(size.label(), OPAQUE)));
        }
    }

    #[test]
    fn test_readout_follows_board() {
        let mut manager = fixture();
        manager.grid_mut().unwrap().toggle_cell(63);
        let mut surface = RecordingSurface::default();
        render_frame(&mut manager, &mut surface);
        assert!(surface.images().contains(&("0x1", OPAQUE)));

        manager.grid_mut().unwrap().toggle_cell(0);
        let mut surface = RecordingSurface::default();
        render_frame(&mut manager, &mut surface);
        let text = "0x8000000000000001";
        assert!(surface.images().contains(&(text, OPAQUE)));

        let readout = manager
            .widgets()
            .iter()
            .find_map(|w| match w {
                Widget::Button(b) if matches!(b.kind, ButtonKind::NumericDisplay(_)) => Some(b),
                _ => None,
            })
            .unwrap();
        assert_eq!(readout.rect, Rect::new(200, 710, text.len() as i32, 1));
    }

    #[test]
    fn test_hovered_label_is_translucent() {
        let mut manager = fixture();
        for widget in manager.widgets_mut() {
            if let Widget::Button(button) = widget {
                if button.kind == ButtonKind::Copy {
                    button.hovered = true;
                }
            }
        }
        let mut surface = RecordingSurface::default();
        render_frame(&mut manager, &mut surface);

        let copy = surface
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Image { text, dest, opacity } if text == "Copy" => Some((*dest, *opacity)),
                _ => None,
            })
            .unwrap();
        assert_eq!(copy, (Rect::new(3, 7, 4, 1), HOVER_OPACITY));
    }

    #[test]
    fn test_lit_cells_are_filled() {
        let mut manager = fixture();
        let grid = manager.grid_mut().unwrap();
        grid.toggle_cell(0);
        grid.toggle_cell(9);
        grid.toggle_cell(63);
        let mut surface = RecordingSurface::default();
        render_frame(&mut manager, &mut surface);
        assert_eq!(surface.filled_count(), 3);
    }

    #[test]
    fn test_notice_is_centered() {
        let mut surface = RecordingSurface::default();
        render_notice(&mut surface, 40, 11, "too small");
        assert_eq!(
            surface.ops,
            vec![Op::Image {
                text: "too small".to_string(),
                dest: Rect::new(15, 5, 9, 1),
                opacity: OPAQUE,
            }]
        );
    }
}
