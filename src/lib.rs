//! # Introduction
//!
//! dsstudio is an interactive studio for six classic data structures: array,
//! stack, queue, singly linked list, binary search tree and binary heap.
//! Multi-step operations (batch inserts, searches, traversals, heap sifts) are
//! played back one step at a time in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Key press → Command → Playground → SequenceRunner → Workspace → Frame → TUI
//! ```
//!
//! 1. [`structures`]: the engines. Each keeps its own values and reports
//!    traces (visited indices, BST paths, heap swaps) for the animation.
//! 2. [`sequence`]: a timed step runner with pause, resume and cancel.
//! 3. [`playground`]: turns user commands into engine calls, step sequences,
//!    highlights and status messages.
//! 4. [`snapshot`]: saved visualizations, kept in memory or in a JSON file.
//! 5. [`config`]: command-line options and speed/delay constants.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod config;
pub mod playground;
pub mod sequence;
pub mod snapshot;
pub mod structures;
pub mod ui;
