//! Default control panel and grid placement.
//!
//! Panel on the left (size dropdown, copy, rotate, 3×3 move pad, flip/mirror,
//! clear), numeric readout on the top line, grid filling everything to the
//! right of the panel. Sizes are terminal cells.

use super::surface::TextRenderer;
use super::widget_manager::WidgetManager;
use crate::config::{Config, UiConfig};
use crate::data::{BitGrid, BitState, Button, ButtonKind, Direction, Dropdown, GridSize, Rect};
use anyhow::Result;
use ratatui::style::Color;

/// Narrowest button that still fits "128-Bit" inside a border
const MIN_BUTTON_WIDTH: i32 = 12;

/// Border, label, border
const MIN_BUTTON_HEIGHT: i32 = 3;

/// Rows reserved above the grid for the numeric readout
const READOUT_ROWS: i32 = 2;

/// Header, Copy, rotate, three move rows, flip/mirror, Clear
const PANEL_ROWS: i32 = 8;

/// Move pad, row-major; `None` is the empty center
const MOVE_PAD: [[Option<Direction>; 3]; 3] = [
    [Some(Direction::NorthWest), Some(Direction::North), Some(Direction::NorthEast)],
    [Some(Direction::West), None, Some(Direction::East)],
    [Some(Direction::SouthWest), Some(Direction::South), Some(Direction::SouthEast)],
];

/// Panel sizing derived from the terminal size and `[ui]` overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiMetrics {
    /// Horizontal spacing
    pub padding: i32,
    /// Vertical spacing between panel rows
    pub gap: i32,
    pub button_w: i32,
    pub button_h: i32,
    pub top: i32,
}

impl UiMetrics {
    pub fn from_screen(width: u16, height: u16, ui: &UiConfig) -> Self {
        let button_w = if ui.button_width > 0 {
            i32::from(ui.button_width)
        } else {
            (i32::from(width) / 9).max(MIN_BUTTON_WIDTH)
        };
        let wanted_h = if ui.button_height > 0 {
            i32::from(ui.button_height)
        } else {
            (i32::from(height) / 13).max(MIN_BUTTON_HEIGHT)
        };
        let padding = i32::from(ui.padding);
        let (button_h, gap) = fit_panel_rows(wanted_h, padding, i32::from(height) - READOUT_ROWS);
        Self {
            padding,
            gap,
            button_w,
            button_h,
            top: READOUT_ROWS,
        }
    }

    /// Region right of the panel and below the readout
    pub fn grid_bounds(&self, width: u16, height: u16) -> Rect {
        let x = self.padding * 3 + self.button_w;
        let y = self.top;
        Rect::new(x, y, i32::from(width) - x, i32::from(height) - y)
    }
}

/// Button height and row gap so all panel rows fit in `available` rows
///
/// Shrinks the buttons first, then drops the gap once buttons would get
/// shorter than a bordered label.
fn fit_panel_rows(wanted_h: i32, padding: i32, available: i32) -> (i32, i32) {
    for gap in [padding, 0] {
        let fit = (available - gap * (PANEL_ROWS - 1)) / PANEL_ROWS;
        if fit >= wanted_h.min(MIN_BUTTON_HEIGHT) {
            return (wanted_h.min(fit), gap);
        }
    }
    ((available / PANEL_ROWS).max(1), 0)
}

/// Hands out palette colors in order, wrapping around
struct Palette {
    colors: Vec<Color>,
    next: usize,
}

impl Palette {
    fn new(colors: Vec<Color>) -> Self {
        Self { colors, next: 0 }
    }

    fn next_color(&mut self) -> Color {
        let color = self.colors.get(self.next % self.colors.len().max(1)).copied().unwrap_or(Color::White);
        self.next += 1;
        color
    }
}

/// Build every widget for a `width × height` screen
pub fn build_default_ui<R: TextRenderer>(
    renderer: &mut R,
    width: u16,
    height: u16,
    config: &Config,
) -> Result<(WidgetManager, UiMetrics)> {
    let metrics = UiMetrics::from_screen(width, height, &config.ui);
    let initial_size = config.board_width()?;
    let mut palette = Palette::new(config.palette());
    let mut manager = WidgetManager::new();

    let UiMetrics {
        padding,
        gap,
        button_w: w,
        button_h: h,
        ..
    } = metrics;
    let x = padding;
    let mut y = metrics.top;

    let grid_bounds = metrics.grid_bounds(width, height);
    manager.add_grid(BitGrid::new(
        initial_size.rows(),
        initial_size.cols(),
        grid_bounds,
        config.cell_color(),
    ));

    // Readout sizes itself to its label on every frame
    let readout_text = BitState::new(initial_size.bits() as u32).to_formatted_string(config.board.display);
    let readout_label = renderer.render_text(&readout_text);
    let (label_w, label_h) = readout_label.as_ref().map_or((0, 0), |l| l.size());
    manager.add_button(Button::new(
        ButtonKind::NumericDisplay(config.board.display),
        Rect::new(grid_bounds.x, 0, label_w, label_h),
        palette.next_color(),
        readout_label,
    ));

    let header = Button::new(
        ButtonKind::GridSize(initial_size),
        Rect::new(x, y, w, h),
        palette.next_color(),
        None,
    );
    let options = GridSize::ALL
        .iter()
        .enumerate()
        .map(|(i, size)| {
            let rect = Rect::new(x, y + h + (h / 2 + 1) * i as i32, w, h / 2);
            let kind = ButtonKind::GridSize(*size);
            Button::new(kind, rect, palette.next_color(), renderer.render_text(kind.caption()))
        })
        .collect();
    manager.add_dropdown(Dropdown::new(header, options, initial_size.index()));
    y += h + gap;

    let mut add = |manager: &mut WidgetManager, kind: ButtonKind, rect: Rect| {
        let label = renderer.render_text(kind.caption());
        manager.add_button(Button::new(kind, rect, palette.next_color(), label));
    };

    add(&mut manager, ButtonKind::Copy, Rect::new(x, y, w, h));
    y += h + gap;

    let half_w = (w - padding) / 2;
    add(&mut manager, ButtonKind::RotateLeft, Rect::new(x, y, half_w, h));
    add(&mut manager, ButtonKind::RotateRight, Rect::new(x + half_w + padding, y, half_w, h));
    y += h + gap;

    let third_w = (w - padding * 2) / 3;
    for row in MOVE_PAD {
        for (col, direction) in row.iter().enumerate() {
            if let Some(direction) = direction {
                let rect = Rect::new(x + col as i32 * (third_w + padding), y, third_w, h);
                add(&mut manager, ButtonKind::Move(*direction), rect);
            }
        }
        y += h + gap;
    }

    add(&mut manager, ButtonKind::Flip, Rect::new(x, y, half_w, h));
    add(&mut manager, ButtonKind::Mirror, Rect::new(x + half_w + padding, y, half_w, h));
    y += h + gap;

    add(&mut manager, ButtonKind::Clear, Rect::new(x, y, w, h));

    tracing::debug!(
        "Built {} widgets for {}x{} screen, grid bounds {:?}",
        manager.len(),
        width,
        height,
        grid_bounds
    );

    Ok((manager, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{LabelImage, Widget};

    /// One cell per character, one row tall
    pub(crate) struct MonospaceText;

    impl TextRenderer for MonospaceText {
        fn render_text(&mut self, label: &str) -> Option<LabelImage> {
            if label.is_empty() {
                None
            } else {
                Some(LabelImage::new(label, label.chars().count() as i32, 1))
            }
        }
    }

    fn build(width: u16, height: u16) -> (WidgetManager, UiMetrics) {
        let config = Config::embedded_default().unwrap();
        build_default_ui(&mut MonospaceText, width, height, &config).unwrap()
    }

    fn buttons(manager: &WidgetManager) -> Vec<&Button> {
        manager
            .widgets()
            .iter()
            .filter_map(|w| match w {
                Widget::Button(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_metrics_derive_from_screen() {
        let metrics = UiMetrics::from_screen(120, 40, &UiConfig::default());
        assert_eq!(metrics.button_w, 13);
        assert_eq!(metrics.button_h, 3);
        assert_eq!(metrics.grid_bounds(120, 40), Rect::new(16, 2, 104, 38));

        assert_eq!(metrics.gap, 1);

        let small = UiMetrics::from_screen(80, 24, &UiConfig::default());
        assert_eq!(small.button_w, MIN_BUTTON_WIDTH);
        assert_eq!((small.button_h, small.gap), (2, 0));

        let fixed = UiConfig {
            button_width: 20,
            button_height: 5,
            ..UiConfig::default()
        };
        let metrics = UiMetrics::from_screen(120, 60, &fixed);
        assert_eq!((metrics.button_w, metrics.button_h), (20, 5));
        // Override is capped by the height that fits
        let capped = UiMetrics::from_screen(120, 40, &fixed);
        assert_eq!((capped.button_h, capped.gap), (3, 1));
    }

    #[test]
    fn test_fit_panel_rows() {
        assert_eq!(fit_panel_rows(3, 1, 38), (3, 1));
        assert_eq!(fit_panel_rows(3, 1, 22), (2, 0));
        assert_eq!(fit_panel_rows(3, 1, 31), (3, 1));
        assert_eq!(fit_panel_rows(3, 1, 30), (3, 0));
        assert_eq!(fit_panel_rows(3, 0, 5), (1, 0));
    }

    #[test]
    fn test_widget_order_and_count() {
        let (manager, _) = build(120, 40);
        let types: Vec<&str> = manager.widgets().iter().map(|w| w.widget_type()).collect();
        assert_eq!(&types[..3], &["grid", "button", "dropdown"]);
        // readout, copy, 2 rotate, 8 moves, flip, mirror, clear
        assert_eq!(buttons(&manager).len(), 15);
        assert_eq!(manager.display_mode(), Some(crate::data::DisplayMode::Hex));

        let dropdown = manager.dropdown().unwrap();
        assert_eq!(dropdown.options.len(), 5);
        assert_eq!(dropdown.selected_grid_size(), Some(GridSize::Bits64));
        assert!(dropdown.options.iter().all(|o| o.label.is_some()));
    }

    #[test]
    fn test_panel_buttons_do_not_overlap() {
        let (manager, metrics) = build(120, 40);
        let panel: Vec<Rect> = buttons(&manager)
            .into_iter()
            .filter(|b| !matches!(b.kind, ButtonKind::NumericDisplay(_)))
            .map(|b| b.rect)
            .collect();
        for (i, a) in panel.iter().enumerate() {
            for b in &panel[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
            assert!(a.right() < metrics.grid_bounds(120, 40).x);
            assert!(a.bottom() <= 40);
        }
    }

    #[test]
    fn test_panel_fits_standard_terminal() {
        for (width, height) in [(80, 24), (100, 30), (120, 40), (200, 60)] {
            let (manager, metrics) = build(width, height);
            let panel: Vec<&Button> = buttons(&manager)
                .into_iter()
                .filter(|b| !matches!(b.kind, ButtonKind::NumericDisplay(_)))
                .collect();
            assert_eq!(panel.len(), 14);
            for (i, a) in panel.iter().enumerate() {
                assert!(
                    a.rect.bottom() <= i32::from(height),
                    "{:?} off-screen at {:?} on {}x{}",
                    a.kind,
                    a.rect,
                    width,
                    height
                );
                assert!(a.rect.right() < metrics.grid_bounds(width, height).x);
                for b in &panel[i + 1..] {
                    assert!(!a.rect.intersects(&b.rect), "{:?} overlaps {:?}", a.kind, b.kind);
                }
            }
        }
    }

    #[test]
    fn test_open_options_cover_copy_button() {
        let (manager, _) = build(120, 40);
        let copy = buttons(&manager)
            .into_iter()
            .find(|b| b.kind == ButtonKind::Copy)
            .map(|b| b.rect)
            .unwrap();
        let dropdown = manager.dropdown().unwrap();
        assert!(dropdown.options.iter().any(|o| o.rect.intersects(&copy)));
    }

    #[test]
    fn test_readout_sized_to_label() {
        let (manager, metrics) = build(120, 40);
        let readout = buttons(&manager)
            .into_iter()
            .find(|b| matches!(b.kind, ButtonKind::NumericDisplay(_)))
            .unwrap();
        assert_eq!(readout.label.as_ref().map(|l| l.text()), Some("0x0"));
        assert_eq!(readout.rect, Rect::new(metrics.grid_bounds(120, 40).x, 0, 3, 1));
    }

    #[test]
    fn test_initial_width_from_config() {
        let mut config = Config::embedded_default().unwrap();
        config.board.width = "128-bit".to_string();
        let (mut manager, _) = build_default_ui(&mut MonospaceText, 200, 60, &config).unwrap();
        manager.sync_grid_layout().unwrap();
        let grid = manager.grid().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (8, 16));
        assert_eq!(grid.state.width(), 128);
    }
}
