//! Array-backed binary heap with a min/max mode
//!
//! The heap is a complete binary tree stored densely in a vector:
//!
//! ```text
//! parent(i) = (i - 1) / 2     left(i) = 2i + 1     right(i) = 2i + 2
//! ```
//!
//! Sift operations return the index pairs they swapped so the coordinator can
//! animate them.

use super::payload::{HeapMode, Payload};
use super::Structure;

pub fn parent(i: usize) -> usize {
    (i - 1) / 2
}

pub fn left(i: usize) -> usize {
    2 * i + 1
}

pub fn right(i: usize) -> usize {
    2 * i + 2
}

/// Swap record `(from, to)` in the order the swaps happened
pub type Swaps = Vec<(usize, usize)>;

#[derive(Debug, Clone, PartialEq)]
pub struct HeapInsert {
    /// Where the inserted value came to rest
    pub index: usize,
    pub swaps: Swaps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeapExtract {
    pub value: Option<f64>,
    pub swaps: Swaps,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeapStructure {
    values: Vec<f64>,
    mode: HeapMode,
}

impl HeapStructure {
    pub fn new(mode: HeapMode) -> Self {
        HeapStructure {
            values: Vec::new(),
            mode,
        }
    }

    /// Build from arbitrary values with an O(n) heapify
    pub fn from_values(values: &[f64], mode: HeapMode) -> Self {
        let mut heap = HeapStructure {
            values: values.to_vec(),
            mode,
        };
        heap.heapify();
        heap
    }

    pub fn mode(&self) -> HeapMode {
        self.mode
    }

    /// Switch mode and re-heapify; returns `false` when the mode is unchanged
    pub fn set_mode(&mut self, mode: HeapMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.heapify();
        true
    }

    pub fn peek(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn insert(&mut self, value: f64) -> HeapInsert {
        self.values.push(value);
        let (index, swaps) = self.sift_up(self.values.len() - 1);
        HeapInsert { index, swaps }
    }

    /// Remove the root
    ///
    /// A single-element heap is popped directly without any sift-down.
    pub fn extract(&mut self) -> HeapExtract {
        match self.values.len() {
            0 => HeapExtract {
                value: None,
                swaps: Vec::new(),
            },
            1 => HeapExtract {
                value: self.values.pop(),
                swaps: Vec::new(),
            },
            _ => {
                let root = self.values.swap_remove(0);
                let swaps = self.sift_down(0);
                HeapExtract {
                    value: Some(root),
                    swaps,
                }
            }
        }
    }

    fn sift_up(&mut self, start: usize) -> (usize, Swaps) {
        let mut swaps = Vec::new();
        let mut i = start;
        while i > 0 {
            let p = parent(i);
            if !self.mode.prefers(self.values[i], self.values[p]) {
                break;
            }
            self.values.swap(i, p);
            swaps.push((i, p));
            i = p;
        }
        (i, swaps)
    }

    /// Move the value at `start` down; a child only wins on a strict comparison,
    /// left before right
    fn sift_down(&mut self, start: usize) -> Swaps {
        let mut swaps = Vec::new();
        let len = self.values.len();
        let mut i = start;
        loop {
            let mut candidate = i;
            for child in [left(i), right(i)] {
                if child < len && self.mode.prefers(self.values[child], self.values[candidate]) {
                    candidate = child;
                }
            }
            if candidate == i {
                break;
            }
            self.values.swap(i, candidate);
            swaps.push((i, candidate));
            i = candidate;
        }
        swaps
    }

    /// Bottom-up sift-down from the last internal node
    fn heapify(&mut self) {
        for i in (0..self.values.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    /// Check the heap property for every non-root index
    pub fn is_valid(&self) -> bool {
        (1..self.values.len())
            .all(|i| !self.mode.prefers(self.values[i], self.values[parent(i)]))
    }
}

impl Structure for HeapStructure {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    fn serialize(&self) -> Payload {
        Payload::from_values(self.to_vec()).with_mode(self.mode)
    }

    /// Load raw values and re-heapify under the payload's mode (min when absent)
    fn load(&mut self, payload: &Payload) -> bool {
        self.mode = payload.mode.unwrap_or_default();
        self.values = payload.values.clone();
        self.heapify();
        true
    }
}
