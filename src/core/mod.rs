//! Core editor logic
//!
//! Widget list, pointer routing, layout and the per-frame draw pass.
//! NO terminal access: frontends translate events in and supply a `Surface`
//! to draw on.

pub mod app_core;
pub mod event_bridge;
pub mod input_result;
pub mod input_router;
pub mod layout;
pub mod render;
pub mod surface;
pub mod widget_manager;

pub use app_core::AppCore;
pub use event_bridge::to_app_event;
pub use input_result::InputResult;
