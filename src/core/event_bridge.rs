//! Translation from frontend events to core events
//!
//! Mouse motion and left-button presses become [`PointerEvent`]s; q, Esc and
//! Ctrl+C quit. Everything else is ignored.

use super::input_router::PointerEvent;
use crate::frontend::FrontendEvent;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};

/// Event shape the core acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Pointer(PointerEvent),
    Resize { width: u16, height: u16 },
    Quit,
}

/// Convert a frontend event, or `None` if the core does not care about it
pub fn to_app_event(event: &FrontendEvent) -> Option<AppEvent> {
    match event {
        FrontendEvent::Mouse { kind, x, y, .. } => {
            let (x, y) = (i32::from(*x), i32::from(*y));
            let pointer = match kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerEvent::Move { x, y },
                MouseEventKind::Down(MouseButton::Left) => PointerEvent::Down { x, y },
                MouseEventKind::Up(MouseButton::Left) => PointerEvent::Up,
                _ => return None,
            };
            Some(AppEvent::Pointer(pointer))
        }
        FrontendEvent::Key { code, modifiers } => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(AppEvent::Quit),
            _ => None,
        },
        FrontendEvent::Resize { width, height } => Some(AppEvent::Resize {
            width: *width,
            height: *height,
        }),
    }
}
