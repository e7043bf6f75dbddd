//! Singly linked list with head and tail handles
//!
//! Nodes live in a slot arena and link to each other by slot index, so the
//! list owns every node exclusively and no node is reachable from more than
//! one link. Freed slots go on a free list and are reused by later inserts,
//! much like tombstoned blocks in an allocator.
//!
//! # Invariants
//!
//! - `head` is `None` exactly when `tail` is `None` and `length == 0`
//! - the node at `tail` has `next == None`
//! - `length` is maintained incrementally and always equals the chain length

use super::errors::StructureError;
use super::payload::Payload;
use super::{LinearSearch, Removal, Structure};

type NodeId = usize;

#[derive(Debug, Clone)]
struct ListNode {
    value: f64,
    next: Option<NodeId>,
}

#[derive(Debug, Clone)]
enum Slot {
    Live(ListNode),
    Free { next_free: Option<NodeId> },
}

/// Result of [`LinkedListStructure::delete_by_value`]
///
/// `visited` is kept on failure too so the caller can still animate the scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDeletion {
    pub visited: Vec<usize>,
    pub result: Result<f64, StructureError>,
}

impl ValueDeletion {
    pub fn deleted(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LinkedListStructure {
    slots: Vec<Slot>,
    free_head: Option<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    length: usize,
}

impl LinkedListStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[f64]) -> Self {
        let mut list = Self::new();
        for &value in values {
            list.append(value);
        }
        list
    }

    fn allocate(&mut self, value: f64, next: Option<NodeId>) -> NodeId {
        let node = ListNode { value, next };
        match self.free_head {
            Some(id) => {
                if let Slot::Free { next_free } = self.slots[id] {
                    self.free_head = next_free;
                }
                self.slots[id] = Slot::Live(node);
                id
            }
            None => {
                self.slots.push(Slot::Live(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> f64 {
        let slot = std::mem::replace(
            &mut self.slots[id],
            Slot::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id);
        match slot {
            Slot::Live(node) => node.value,
            Slot::Free { .. } => unreachable!("released a free list slot {}", id),
        }
    }

    fn node(&self, id: NodeId) -> &ListNode {
        match &self.slots[id] {
            Slot::Live(node) => node,
            Slot::Free { .. } => unreachable!("dangling list link {}", id),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut ListNode {
        match &mut self.slots[id] {
            Slot::Live(node) => node,
            Slot::Free { .. } => unreachable!("dangling list link {}", id),
        }
    }

    /// Walk from the head to the node at `index`
    fn id_at(&self, index: usize) -> Option<NodeId> {
        let mut current = self.head;
        for _ in 0..index {
            current = self.node(current?).next;
        }
        current
    }

    /// Insert at the tail in O(1)
    pub fn append(&mut self, value: f64) {
        let id = self.allocate(value, None);
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.length += 1;
    }

    /// Insert at the head in O(1)
    pub fn prepend(&mut self, value: f64) {
        let id = self.allocate(value, self.head);
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.length += 1;
    }

    /// Insert so that the value ends up at `index` (valid range `0..=len`)
    pub fn insert_at(&mut self, index: usize, value: f64) -> Result<usize, StructureError> {
        if index > self.length {
            return Err(StructureError::invalid_index(index, self.length));
        }
        if index == 0 {
            self.prepend(value);
            return Ok(0);
        }
        if index == self.length {
            self.append(value);
            return Ok(index);
        }

        let prev = self
            .id_at(index - 1)
            .ok_or_else(|| StructureError::invalid_index(index, self.length))?;
        let next = self.node(prev).next;
        let id = self.allocate(value, next);
        self.node_mut(prev).next = Some(id);
        self.length += 1;
        Ok(index)
    }

    /// Remove the head in O(1); `None` on an empty list
    pub fn remove_head(&mut self) -> Option<f64> {
        let head = self.head?;
        self.head = self.node(head).next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.length -= 1;
        Some(self.release(head))
    }

    /// Remove the node at `index` (valid range `0..len`)
    pub fn remove_at(&mut self, index: usize) -> Result<Removal, StructureError> {
        if self.head.is_none() {
            return Err(StructureError::EmptyStructure { kind: "List" });
        }
        if index >= self.length {
            return Err(StructureError::invalid_index(index, self.length));
        }
        if index == 0 {
            let value = self
                .remove_head()
                .ok_or(StructureError::EmptyStructure { kind: "List" })?;
            return Ok(Removal { value, index: 0 });
        }

        let prev = self
            .id_at(index - 1)
            .ok_or_else(|| StructureError::invalid_index(index, self.length))?;
        let value = self.unlink_after(prev);
        Ok(Removal { value, index })
    }

    /// Unlink the successor of `prev`, fixing up `tail` when it was the last node
    fn unlink_after(&mut self, prev: NodeId) -> f64 {
        let Some(target) = self.node(prev).next else {
            unreachable!("unlink past the tail")
        };
        let after = self.node(target).next;
        self.node_mut(prev).next = after;
        if self.tail == Some(target) {
            self.tail = Some(prev);
        }
        self.length -= 1;
        self.release(target)
    }

    /// Remove the first node holding `value`, recording every index checked
    pub fn delete_by_value(&mut self, value: f64) -> ValueDeletion {
        let mut visited = Vec::new();
        let Some(head) = self.head else {
            return ValueDeletion {
                visited,
                result: Err(StructureError::EmptyStructure { kind: "List" }),
            };
        };

        visited.push(0);
        if self.node(head).value == value {
            let result = self
                .remove_head()
                .ok_or(StructureError::EmptyStructure { kind: "List" });
            return ValueDeletion { visited, result };
        }

        let mut prev = head;
        let mut index = 1;
        while let Some(current) = self.node(prev).next {
            visited.push(index);
            if self.node(current).value == value {
                let removed = self.unlink_after(prev);
                return ValueDeletion {
                    visited,
                    result: Ok(removed),
                };
            }
            prev = current;
            index += 1;
        }

        ValueDeletion {
            visited,
            result: Err(StructureError::ValueNotFound { value }),
        }
    }

    pub fn search(&self, value: f64) -> LinearSearch {
        let mut visited = Vec::new();
        for (index, candidate) in self.iter().enumerate() {
            visited.push(index);
            if candidate == value {
                return LinearSearch {
                    visited,
                    found: Some(index),
                };
            }
        }
        LinearSearch {
            visited,
            found: None,
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    pub fn head(&self) -> Option<f64> {
        self.head.map(|id| self.node(id).value)
    }

    pub fn tail(&self) -> Option<f64> {
        self.tail.map(|id| self.node(id).value)
    }
}

/// Value iterator from head to tail
pub struct Iter<'a> {
    list: &'a LinkedListStructure,
    cursor: Option<NodeId>,
}

impl Iterator for Iter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let node = self.list.node(self.cursor?);
        self.cursor = node.next;
        Some(node.value)
    }
}

impl Structure for LinkedListStructure {
    fn len(&self) -> usize {
        self.length
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.head = None;
        self.tail = None;
        self.length = 0;
    }

    fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    fn serialize(&self) -> Payload {
        Payload::from_values(self.to_vec())
    }

    fn load(&mut self, payload: &Payload) -> bool {
        self.clear();
        for &value in &payload.values {
            self.append(value);
        }
        true
    }
}
