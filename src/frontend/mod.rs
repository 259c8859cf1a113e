//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates terminal concerns from editor logic. The main loop only talks to
/// the core through this interface.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Waits up to the frame interval for the first event, then drains whatever
    /// else is already queued. Returns an empty list on timeout.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Draw one frame of the current core state
    ///
    /// Mutable because the numeric readout re-renders its label during the pass.
    fn render(&mut self, core: &mut AppCore) -> Result<()>;

    /// Restore the terminal before exit (safe to call more than once)
    fn cleanup(&mut self) -> Result<()>;

    /// Current drawable size in cells, `(width, height)`
    fn size(&self) -> (u16, u16);
}
