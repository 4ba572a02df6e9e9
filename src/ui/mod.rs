//! Rendering layer: everything that touches Ratatui widgets.
//!
//! Views render into an off-screen buffer of their assigned size and hand
//! the result back as styled text; see [`canvas`].

pub mod canvas;
pub mod cursor;
pub mod layout;
pub mod spinner;
pub mod theme;
