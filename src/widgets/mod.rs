//! Reference views: three leaves and four composites.

pub mod executor;
pub mod fancytext;
pub mod frame;
pub mod menu;
pub mod table;
pub mod tabs;
pub mod validation;

pub use executor::{ExecState, Executor};
pub use fancytext::FancyText;
pub use frame::{Frame, FrameBuilder};
pub use menu::{Menu, MenuEntry, MenuItem};
pub use table::{Column, Table, TableBuilder};
pub use tabs::{Tab, Tabs};
pub use validation::{Choice, Confirmation, Validation};
