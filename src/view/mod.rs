//! The capability contract every node of the composition tree satisfies,
//! plus the dispatch rules shared by composites.
//!
//! A view owns its state and its children outright.  Children never hold a
//! reference to their owner: they ask to be left by returning
//! [`Cmd::Ascend`] from `update`, and the owner decides what that means.

pub mod dispatch;
pub mod msg;
pub mod registry;

#[cfg(test)]
pub(crate) mod probe;

use ratatui::text::Text;

pub use msg::{Cmd, Msg, Outcome, TaskFuture, ValidationStatus};
pub use registry::Registry;

/// A node in the view tree.
///
/// `update` runs on the dispatch thread and must return promptly: anything
/// slow belongs in a [`Cmd::Task`].  The stored value *is* the next state,
/// so owners keep their `Box<dyn View>` and call through `&mut`.
pub trait View {
    /// Commands to schedule when the tree starts.
    fn init(&mut self) -> Vec<Cmd> {
        Vec::new()
    }

    fn update(&mut self, msg: Msg) -> Vec<Cmd>;

    /// Render at the size most recently assigned through `set_width` /
    /// `set_height`.
    fn view(&self) -> Text<'static>;

    fn set_width(&mut self, width: u16);

    fn set_height(&mut self, height: u16);

    /// Return to the display state produced by construction.  Composites
    /// reset every child as well.
    fn reset(&mut self);
}
