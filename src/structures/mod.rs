//! Structure engines
//!
//! Six independent abstract data types over `f64` values:
//! - [`array`]: index-addressed dynamic array
//! - [`stack`]: LIFO stack
//! - [`queue`]: FIFO queue
//! - [`linked_list`]: singly linked list with head/tail handles
//! - [`bst`]: unbalanced binary search tree
//! - [`heap`]: array-backed binary heap with min/max mode
//!
//! [`tree`] holds the iterative walks shared by the BST and its exported shape.
//!
//! Every engine implements [`Structure`], the common subset used for
//! rendering and persistence round-trips. Structure-specific operations stay
//! on the concrete types and are reached through the [`AnyStructure`] tagged
//! union, selected by [`StructureKind`].
//!
//! # Error Handling
//!
//! Engines never panic on user input. Expected conditions such as popping an
//! empty stack return `None`; operations that can be refused return
//! `Result<_, StructureError>` and leave the structure unmodified.

pub mod array;
pub mod bst;
pub mod errors;
pub mod heap;
pub mod linked_list;
pub mod payload;
pub mod queue;
pub mod stack;
pub mod tree;

use array::ArrayStructure;
use bst::BstStructure;
use heap::HeapStructure;
use linked_list::LinkedListStructure;
use payload::{HeapMode, Payload};
use queue::QueueStructure;
use serde::{Deserialize, Serialize};
use stack::StackStructure;
use std::fmt;

/// Common subset shared by all engines
pub trait Structure {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Copy of the contents in display order
    fn to_vec(&self) -> Vec<f64>;

    fn serialize(&self) -> Payload;

    /// Replace the contents from `payload`; `false` when it is rejected
    fn load(&mut self, payload: &Payload) -> bool;
}

/// Value and position removed by an index-based delete
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Removal {
    pub value: f64,
    pub index: usize,
}

/// Indices visited by a linear scan and the first match
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSearch {
    pub visited: Vec<usize>,
    pub found: Option<usize>,
}

impl LinearSearch {
    /// Matching index, or -1 when absent
    pub fn found_index(&self) -> i64 {
        self.found
            .and_then(|i| i64::try_from(i).ok())
            .unwrap_or(-1)
    }
}

/// Static description of a structure shown next to the visualization
#[derive(Debug)]
pub struct StructureInfo {
    pub description: &'static str,
    pub operations: &'static [&'static str],
    pub complexities: &'static [&'static str],
}

/// Structure selector; serialized with the same keys as [`StructureKind::key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Array,
    Stack,
    Queue,
    LinkedList,
    Bst,
    BinaryHeap,
}

impl StructureKind {
    pub const ALL: [StructureKind; 6] = [
        StructureKind::Array,
        StructureKind::Stack,
        StructureKind::Queue,
        StructureKind::LinkedList,
        StructureKind::Bst,
        StructureKind::BinaryHeap,
    ];

    /// Key used in persisted snapshot records
    pub fn key(self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
            StructureKind::LinkedList => "linkedlist",
            StructureKind::Bst => "bst",
            StructureKind::BinaryHeap => "binaryheap",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StructureKind::Array => "Array",
            StructureKind::Stack => "Stack",
            StructureKind::Queue => "Queue",
            StructureKind::LinkedList => "Linked List",
            StructureKind::Bst => "Binary Search Tree",
            StructureKind::BinaryHeap => "Binary Heap",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key.trim())
    }

    /// Fresh, empty engine of this kind
    pub fn create(self) -> AnyStructure {
        match self {
            StructureKind::Array => AnyStructure::Array(ArrayStructure::new()),
            StructureKind::Stack => AnyStructure::Stack(StackStructure::new()),
            StructureKind::Queue => AnyStructure::Queue(QueueStructure::new()),
            StructureKind::LinkedList => AnyStructure::LinkedList(LinkedListStructure::new()),
            StructureKind::Bst => AnyStructure::Bst(BstStructure::new()),
            StructureKind::BinaryHeap => AnyStructure::Heap(HeapStructure::new(HeapMode::Min)),
        }
    }

    /// Next kind in selector order, wrapping around
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn info(self) -> &'static StructureInfo {
        match self {
            StructureKind::Array => &ARRAY_INFO,
            StructureKind::Stack => &STACK_INFO,
            StructureKind::Queue => &QUEUE_INFO,
            StructureKind::LinkedList => &LINKED_LIST_INFO,
            StructureKind::Bst => &BST_INFO,
            StructureKind::BinaryHeap => &HEAP_INFO,
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

static ARRAY_INFO: StructureInfo = StructureInfo {
    description: "A linear structure storing elements in contiguous slots, enabling random access by index.",
    operations: &["insert(value, index?)", "delete(index)", "search(value)"],
    complexities: &["Access by index: O(1)", "Insert/remove end: O(1)", "Insert/remove middle: O(n)", "Search: O(n)"],
};

static STACK_INFO: StructureInfo = StructureInfo {
    description: "A LIFO structure: insertion and deletion happen only at the top.",
    operations: &["push(value)", "pop()", "peek()"],
    complexities: &["Push/Pop/Peek: O(1)", "Search: O(n)"],
};

static QUEUE_INFO: StructureInfo = StructureInfo {
    description: "A FIFO structure: elements join at the rear and leave from the front.",
    operations: &["enqueue(value)", "dequeue()", "peek front / rear"],
    complexities: &["Enqueue/Dequeue: O(1)", "Search: O(n)"],
};

static LINKED_LIST_INFO: StructureInfo = StructureInfo {
    description: "A chain of nodes, each holding a value and a link to the next node.",
    operations: &["append / prepend", "insert at index", "remove head", "delete by value / at index", "search"],
    complexities: &["Append/Prepend: O(1)", "Insert/Delete at index: O(n)", "Search: O(n)"],
};

static BST_INFO: StructureInfo = StructureInfo {
    description: "A binary tree where every left subtree holds smaller values and every right subtree larger ones. Not self-balancing.",
    operations: &["insert(value)", "delete(value)", "search(value)", "pre / in / post / level-order traversal"],
    complexities: &["Insert/Search/Delete: O(h), O(n) when degenerate", "Traversal: O(n)"],
};

static HEAP_INFO: StructureInfo = StructureInfo {
    description: "A complete binary tree stored in an array where every parent orders before its children.",
    operations: &["insert(value)", "extract root", "peek root", "switch min / max mode"],
    complexities: &["Insert/Extract: O(log n)", "Peek: O(1)", "Heapify: O(n)"],
};

/// One engine of any kind
#[derive(Debug, Clone)]
pub enum AnyStructure {
    Array(ArrayStructure),
    Stack(StackStructure),
    Queue(QueueStructure),
    LinkedList(LinkedListStructure),
    Bst(BstStructure),
    Heap(HeapStructure),
}

impl AnyStructure {
    pub fn kind(&self) -> StructureKind {
        match self {
            AnyStructure::Array(_) => StructureKind::Array,
            AnyStructure::Stack(_) => StructureKind::Stack,
            AnyStructure::Queue(_) => StructureKind::Queue,
            AnyStructure::LinkedList(_) => StructureKind::LinkedList,
            AnyStructure::Bst(_) => StructureKind::Bst,
            AnyStructure::Heap(_) => StructureKind::BinaryHeap,
        }
    }

    fn engine(&self) -> &dyn Structure {
        match self {
            AnyStructure::Array(s) => s,
            AnyStructure::Stack(s) => s,
            AnyStructure::Queue(s) => s,
            AnyStructure::LinkedList(s) => s,
            AnyStructure::Bst(s) => s,
            AnyStructure::Heap(s) => s,
        }
    }

    fn engine_mut(&mut self) -> &mut dyn Structure {
        match self {
            AnyStructure::Array(s) => s,
            AnyStructure::Stack(s) => s,
            AnyStructure::Queue(s) => s,
            AnyStructure::LinkedList(s) => s,
            AnyStructure::Bst(s) => s,
            AnyStructure::Heap(s) => s,
        }
    }
}

impl Structure for AnyStructure {
    fn len(&self) -> usize {
        self.engine().len()
    }

    fn clear(&mut self) {
        self.engine_mut().clear()
    }

    fn to_vec(&self) -> Vec<f64> {
        self.engine().to_vec()
    }

    fn serialize(&self) -> Payload {
        self.engine().serialize()
    }

    fn load(&mut self, payload: &Payload) -> bool {
        self.engine_mut().load(payload)
    }
}
