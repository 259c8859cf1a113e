//! Side effects requested by the input router.
//!
//! Widget state changes are applied in place; anything that has to leave the
//! core (clipboard writes) or that is only worth reporting comes back as an
//! `InputResult` for the main loop to act on.

use crate::data::{ButtonKind, DisplayMode, GridSize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Write the formatted board to the system clipboard
    CopyToClipboard { text: String },

    /// Board zeroed by the Clear button
    Cleared,

    /// Numeric display switched to a new mode
    DisplayModeChanged(DisplayMode),

    /// Size dropdown picked a (possibly identical) board width
    GridSizeSelected(GridSize),

    /// Recognized click on an action with no board transformation yet
    Unimplemented(ButtonKind),
}

impl InputResult {
    /// Check if the result has to be handled outside the core
    pub fn needs_platform(&self) -> bool {
        matches!(self, InputResult::CopyToClipboard { .. })
    }
}
