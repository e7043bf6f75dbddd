//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`structure`]: the current structure, drawn as cells, a chain or a tree
//! - [`info`]: description, operations and complexities of the structure
//! - [`saved`]: saved visualizations with a selection cursor
//! - [`input`]: value, index and save-name fields
//! - [`status`]: status bar with keybindings and sequence state
//!
//! Each pane module exports a primary `render_*` function plus the state or
//! data types it needs.

pub mod info;
pub mod input;
pub mod saved;
pub mod status;
pub mod structure;

pub use info::render_info_pane;
pub use input::{render_input_bar, InputField, InputRenderData};
pub use saved::{render_saved_pane, SavedListing};
pub use status::{render_status_bar, StatusRenderData};
pub use structure::{render_structure_pane, StructureScrollState};
