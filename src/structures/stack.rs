//! LIFO stack over a growable backing vector

use super::payload::Payload;
use super::Structure;

/// Last-in first-out stack; the top is the last element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackStructure {
    items: Vec<f64>,
}

impl StackStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.items.push(value);
    }

    /// Remove the top value; `None` on an empty stack
    pub fn pop(&mut self) -> Option<f64> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<f64> {
        self.items.last().copied()
    }
}

impl Structure for StackStructure {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn to_vec(&self) -> Vec<f64> {
        self.items.clone()
    }

    fn serialize(&self) -> Payload {
        Payload::from_values(self.to_vec())
    }

    fn load(&mut self, payload: &Payload) -> bool {
        self.items = payload.values.clone();
        true
    }
}
