//! Compose interactive terminal screens from nested views.
//!
//! Every node implements [`View`].  Composites own their children and route
//! messages down to whichever child is active; a child leaves by answering
//! with [`Cmd::Ascend`], after which its owner resets the whole branch.
//! [`app::Program`] drives a root view against a real terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod ui;
pub mod view;
pub mod widgets;

pub use config::Config;
pub use error::BuildError;
pub use view::{Cmd, Msg, Outcome, View};
