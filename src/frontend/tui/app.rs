use super::surface::{measure_label, BufferSurface};
use crate::core::surface::TextRenderer;
use crate::core::AppCore;
use crate::data::LabelImage;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, style::Style, widgets::Block, Terminal};
use std::io;
use std::time::Duration;

/// TUI Frontend using ratatui
///
/// Renders the editor into the alternate screen and reads keyboard and mouse
/// events via crossterm. Any-motion mouse tracking is enabled so hover and
/// drag painting see every move.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture, and enters alternate screen.
    /// If a later step fails, the steps already taken are undone before returning.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        let terminal = match Self::setup_terminal() {
            Ok(terminal) => terminal,
            Err(e) => {
                if let Err(restore_err) = restore_terminal(&mut io::stdout()) {
                    tracing::warn!("Failed to restore terminal after setup error: {}", restore_err);
                }
                return Err(e);
            }
        };

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            restored: false,
        })
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        Ok(terminal)
    }

    /// Set poll timeout (for controlling frame rate)
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only key presses; repeats and releases are ignored
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Mouse(mouse_event) => Some(FrontendEvent::mouse(
                mouse_event.kind,
                mouse_event.column,
                mouse_event.row,
                mouse_event.modifiers,
            )),
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            _ => None,
        }
    }
}

impl TextRenderer for TuiFrontend {
    fn render_text(&mut self, label: &str) -> Option<LabelImage> {
        measure_label(label)
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // Wait up to one frame for the first event, then drain without blocking
        let mut timeout = self.poll_timeout;
        while event::poll(timeout).context("Failed to poll terminal events")? {
            let ev = event::read().context("Failed to read terminal event")?;
            if let Some(frontend_event) = Self::convert_event(ev) {
                events.push(frontend_event);
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &mut AppCore) -> Result<()> {
        let background = core.background();
        let mut outcome = Ok(());

        self.terminal
            .draw(|f| {
                let area = f.area();
                f.render_widget(Block::default().style(Style::default().bg(background)), area);
                let mut surface = BufferSurface::new(f.buffer_mut(), area);
                outcome = core.render(&mut surface);
            })
            .context("Failed to draw frame")?;

        outcome
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        // Every step runs; the first failure is reported
        let cursor = self.terminal.show_cursor();
        let restore = restore_terminal(self.terminal.backend_mut());
        let result = cursor.and(restore).context("Failed to restore terminal");
        self.restored = result.is_ok();
        result
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

/// Undo terminal setup in reverse order
///
/// Both steps always run; the first error is returned.
fn restore_terminal<W: io::Write>(out: &mut W) -> io::Result<()> {
    let screen = execute!(out, DisableMouseCapture, LeaveAlternateScreen, cursor::Show);
    let raw = disable_raw_mode();
    screen.and(raw)
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}
