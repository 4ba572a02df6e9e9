//! Run-loop adapter: terminal input, task scheduling and drawing around a
//! root view.

pub mod event;
pub mod program;

pub use program::{Flow, Handle, Program};
