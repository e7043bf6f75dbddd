//! Index-addressed dynamic array

use super::errors::StructureError;
use super::payload::Payload;
use super::{LinearSearch, Removal, Structure};

/// Ordered sequence of numbers with contiguous indices `0..len`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayStructure {
    values: Vec<f64>,
}

impl ArrayStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[f64]) -> Self {
        ArrayStructure {
            values: values.to_vec(),
        }
    }

    /// Insert before `index`, or append when no index is given
    ///
    /// `index == len` is allowed and appends. Returns the index the value
    /// now occupies.
    pub fn insert(&mut self, value: f64, index: Option<usize>) -> Result<usize, StructureError> {
        match index {
            None => {
                self.values.push(value);
                Ok(self.values.len() - 1)
            }
            Some(index) if index <= self.values.len() => {
                self.values.insert(index, value);
                Ok(index)
            }
            Some(index) => Err(StructureError::invalid_index(index, self.values.len())),
        }
    }

    /// Remove the element at `index`, shifting the rest left
    pub fn delete_at(&mut self, index: usize) -> Result<Removal, StructureError> {
        if self.values.is_empty() {
            return Err(StructureError::EmptyStructure { kind: "Array" });
        }
        if index >= self.values.len() {
            return Err(StructureError::invalid_index(index, self.values.len()));
        }
        let value = self.values.remove(index);
        Ok(Removal { value, index })
    }

    /// Linear scan from index 0, stopping at the first exact match
    pub fn search(&self, value: f64) -> LinearSearch {
        let mut visited = Vec::new();
        for (index, &candidate) in self.values.iter().enumerate() {
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

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }
}

impl Structure for ArrayStructure {
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
        Payload::from_values(self.to_vec())
    }

    fn load(&mut self, payload: &Payload) -> bool {
        self.values = payload.values.clone();
        true
    }
}
