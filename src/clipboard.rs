//! Clipboard integration for the Copy button
//!
//! Uses arboard for cross-platform clipboard access. One handle is kept for
//! the whole session: on X11 the copied text is served by the process that
//! owns the handle, so dropping it right after a copy can lose the text.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Clipboard handle held for the lifetime of the editor
#[derive(Default)]
pub struct SessionClipboard {
    handle: Option<Clipboard>,
}

impl SessionClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy text to system clipboard, opening the handle on first use
    pub fn copy(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(()); // Nothing to copy
        }

        let mut clipboard = match self.handle.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().context("Clipboard unavailable")?,
        };
        // A handle that failed is dropped and reopened on the next copy
        clipboard
            .set_text(text.to_string())
            .context("Failed to set clipboard text")?;
        self.handle = Some(clipboard);
        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }

    #[cfg(test)]
    fn is_open(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy_board_value() {
        let mut clipboard = SessionClipboard::new();
        clipboard.copy("0xff00ff00").expect("Copy failed");
        assert!(clipboard.is_open());
        let result = Clipboard::new().and_then(|mut c| c.get_text()).expect("Paste failed");
        assert_eq!(result, "0xff00ff00");

        // Second copy reuses the same handle
        clipboard.copy("0x1").expect("Copy failed");
        assert!(clipboard.is_open());
    }

    #[test]
    fn test_empty_copy() {
        // Should not touch the clipboard on an empty string
        let mut clipboard = SessionClipboard::new();
        assert!(clipboard.copy("").is_ok());
        assert!(!clipboard.is_open());
    }
}
