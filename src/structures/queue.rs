//! FIFO queue

use super::payload::Payload;
use super::Structure;
use std::collections::VecDeque;

/// First-in first-out queue; front is index 0, rear is the last element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueStructure {
    items: VecDeque<f64>,
}

impl QueueStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, value: f64) {
        self.items.push_back(value);
    }

    /// Remove the front value; `None` on an empty queue
    pub fn dequeue(&mut self) -> Option<f64> {
        self.items.pop_front()
    }

    pub fn peek_front(&self) -> Option<f64> {
        self.items.front().copied()
    }

    pub fn peek_rear(&self) -> Option<f64> {
        self.items.back().copied()
    }
}

impl Structure for QueueStructure {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn to_vec(&self) -> Vec<f64> {
        self.items.iter().copied().collect()
    }

    fn serialize(&self) -> Payload {
        Payload::from_values(self.to_vec())
    }

    fn load(&mut self, payload: &Payload) -> bool {
        self.items = payload.values.iter().copied().collect();
        true
    }
}
