//! Construction-time configuration errors.
//!
//! Builders validate everything up front and never hand back a partially
//! built view.  Problems found while dispatching are not errors: they are
//! clamped or ignored.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid width {0}: must be positive")]
    InvalidWidth(u16),

    #[error("invalid height {0}: must be positive")]
    InvalidHeight(u16),

    #[error("column `{title}` has width 0")]
    InvalidColumnWidth { title: String },

    #[error("a table needs at least one column")]
    NoColumns,

    #[error("row {row} has {got} cells, expected {expected}")]
    RowArity {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("duplicate item key `{0}`")]
    DuplicateKey(String),

    #[error("a tab container needs at least one tab")]
    NoTabs,
}
