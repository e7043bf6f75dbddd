// Coordinator-level errors

use crate::snapshot::StoreError;
use crate::structures::errors::StructureError;
use thiserror::Error;

/// Everything a playground command can report back to the status line
#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("Only numbers are supported. Problematic input: \"{token}\".")]
    MalformedInput { token: String },

    #[error("Only numbers are supported. Example: 7 or [7,3,2].")]
    EmptyInput,

    #[error("Index must be an integer.")]
    InvalidIndexInput,

    #[error("Index is required for {action}.")]
    IndexRequired { action: &'static str },

    #[error("Please enter a value to delete.")]
    MissingValue,

    #[error("{action} is not available for {kind}.")]
    UnsupportedAction {
        action: &'static str,
        kind: &'static str,
    },

    #[error("Nothing to save yet.")]
    NothingToSave,

    #[error("Please provide a name.")]
    MissingName,

    #[error("Could not load the saved visualization.")]
    LoadRejected,

    /// A queued step failed; the steps before it stay applied
    #[error("Sequence stopped due to an error: {source}")]
    SequenceAborted {
        step: usize,
        #[source]
        source: Box<PlaygroundError>,
    },

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
