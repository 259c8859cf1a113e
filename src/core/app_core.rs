//! Frontend-agnostic application state.
//!
//! The core is built once for the startup screen size; a grid that cannot be
//! laid out at startup is fatal. Later resizes that leave no room for the grid
//! keep the last valid layout and show a notice until the screen grows again.

use super::event_bridge::AppEvent;
use super::input_result::InputResult;
use super::input_router::{InputRouter, PointerEvent};
use super::layout::{self, UiMetrics};
use super::render;
use super::surface::{Surface, TextRenderer};
use super::widget_manager::WidgetManager;
use crate::config::Config;
use anyhow::{Context, Result};
use ratatui::style::Color;

const TOO_SMALL_NOTICE: &str = "Terminal too small";

/// Core application state (frontend-agnostic)
///
/// AppCore owns the widget list, the pointer router and the panel metrics.
/// Frontends feed it translated events and hand it a `Surface` once per frame.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Every widget, in draw/input order
    pub widgets: WidgetManager,

    /// Pointer held flag and previous position
    pub router: InputRouter,

    /// Panel sizing for the current screen
    pub metrics: UiMetrics,

    /// Application running flag
    pub running: bool,

    /// Current screen size in cells
    screen: (u16, u16),

    /// Set while the screen has no room for the grid
    too_small: bool,
}

impl AppCore {
    /// Build the default UI for a `width × height` screen and lay out the grid
    pub fn new<R: TextRenderer>(config: Config, renderer: &mut R, width: u16, height: u16) -> Result<Self> {
        let (widgets, metrics) =
            layout::build_default_ui(renderer, width, height, &config).context("Failed to build UI")?;
        let mut core = Self {
            config,
            widgets,
            router: InputRouter::new(),
            metrics,
            running: true,
            screen: (width, height),
            too_small: false,
        };
        core.widgets
            .sync_grid_layout()
            .context(format!("Screen {}x{} is too small for the grid", width, height))?;
        tracing::info!("Core ready with {} widgets", core.widgets.len());
        Ok(core)
    }

    /// Dispatch one translated frontend event
    pub fn handle_event(&mut self, event: AppEvent) -> Result<Vec<InputResult>> {
        match event {
            AppEvent::Pointer(pointer) => self.handle_pointer(pointer),
            AppEvent::Resize { width, height } => {
                self.resize(width, height)?;
                Ok(Vec::new())
            }
            AppEvent::Quit => {
                self.quit();
                Ok(Vec::new())
            }
        }
    }

    /// Route a pointer event; ignored while the notice is up
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Vec<InputResult>> {
        if self.too_small {
            return Ok(Vec::new());
        }
        self.router.route(event, &mut self.widgets)
    }

    /// Move the grid region to fit the new screen size
    ///
    /// When the new size has no room for the grid, the previous bounds are
    /// restored and the core switches to the "too small" notice.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.screen = (width, height);
        let previous = self.widgets.grid().map(|grid| grid.bounds());
        let bounds = self.metrics.grid_bounds(width, height);
        tracing::debug!("Resize to {}x{}, grid bounds {:?}", width, height, bounds);
        self.widgets.set_grid_bounds(bounds);

        match self.widgets.sync_grid_layout() {
            Ok(()) => {
                if self.too_small {
                    tracing::info!("Screen {}x{} fits the grid again", width, height);
                }
                self.too_small = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Screen {}x{} is too small for the grid: {:#}", width, height, e);
                if let Some(previous) = previous {
                    self.widgets.set_grid_bounds(previous);
                }
                self.widgets
                    .sync_grid_layout()
                    .context("Failed to restore previous grid layout")?;
                self.too_small = true;
                Ok(())
            }
        }
    }

    /// Sync the grid to the dropdown, then draw one frame
    pub fn render<S: Surface>(&mut self, surface: &mut S) -> Result<()> {
        if self.too_small {
            let (width, height) = self.screen;
            render::render_notice(surface, width, height, TOO_SMALL_NOTICE);
            return Ok(());
        }
        self.widgets.sync_grid_layout()?;
        render::render_frame(&mut self.widgets, surface);
        Ok(())
    }

    pub fn quit(&mut self) {
        tracing::info!("Quit requested");
        self.running = false;
    }

    pub fn background(&self) -> Color {
        self.config.background_color()
    }
}
