// User commands accepted by the playground

use crate::structures::bst::TraversalOrder;
use crate::structures::payload::HeapMode;
use crate::structures::StructureKind;

/// One user action; text fields carry the raw input exactly as typed
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Push, enqueue, array insert, append, BST insert or heap insert
    Insert { input: String, index: String },
    /// Pop, dequeue, array delete, remove head, BST delete or heap extract
    Remove { input: String, index: String },
    Clear,
    /// Stack top or heap root
    Peek,
    PeekFront,
    PeekRear,
    Search { input: String },
    Prepend { input: String },
    InsertAt { input: String, index: String },
    DeleteByValue { input: String },
    DeleteAt { index: String },
    Traverse { order: TraversalOrder },
    SetHeapMode { mode: HeapMode },
    ToggleAutoplay,
    SetSpeed { percent: u32 },
    Select { kind: StructureKind },
    Save { name: String },
    LoadSaved { id: u64 },
    DeleteSaved { id: u64 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Insert { .. } => "Insert",
            Command::Remove { .. } => "Remove",
            Command::Clear => "Clear",
            Command::Peek => "Peek",
            Command::PeekFront => "Peek front",
            Command::PeekRear => "Peek rear",
            Command::Search { .. } => "Search",
            Command::Prepend { .. } => "Prepend",
            Command::InsertAt { .. } => "Insert at index",
            Command::DeleteByValue { .. } => "Delete by value",
            Command::DeleteAt { .. } => "Delete at index",
            Command::Traverse { .. } => "Traversal",
            Command::SetHeapMode { .. } => "Heap mode",
            Command::ToggleAutoplay => "Auto-play",
            Command::SetSpeed { .. } => "Speed",
            Command::Select { .. } => "Select",
            Command::Save { .. } => "Save",
            Command::LoadSaved { .. } => "Load",
            Command::DeleteSaved { .. } => "Delete saved",
        }
    }
}
