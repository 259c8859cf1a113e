//! Data layer - Pure state without UI coupling
//!
//! This module contains the board value, grid geometry and widget state as
//! plain data structures. NO imports from frontend/ or any rendering code.
//! The core mutates these; the render pass reads them.

pub mod bit_state;
pub mod geometry;
pub mod grid;
pub mod widget;

pub use bit_state::*;
pub use geometry::*;
pub use grid::*;
pub use widget::*;
