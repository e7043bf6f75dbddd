//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, input fields
//! - **[`panes`]**: render functions for each visible pane (structure, info,
//!   saved list, input bar, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Construct an [`App`] around a [`Playground`] and call [`App::run`] to start
//! the event loop.
//!
//! [`Playground`]: crate::playground::Playground
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
