//! Render contract between the coordinator and a render adapter
//!
//! The coordinator never draws anything itself. After every change it
//! records [`RenderOptions`] and bumps a frame counter; an adapter asks for
//! the current [`Frame`] and draws it however it likes.

use crate::structures::payload::{HeapMode, TreeShape};
use crate::structures::StructureKind;

/// Contents of the current structure in display order
#[derive(Debug, Clone, PartialEq)]
pub enum RenderData {
    /// Array, stack (bottom to top), queue (front to rear), linked list
    /// (head to tail) and heap (array form)
    Sequence(Vec<f64>),
    /// Full BST shape
    Tree(Option<TreeShape>),
}

impl RenderData {
    pub fn is_empty(&self) -> bool {
        match self {
            RenderData::Sequence(values) => values.is_empty(),
            RenderData::Tree(root) => root.is_none(),
        }
    }
}

/// Elements to emphasize for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub highlight_indices: Vec<usize>,
    pub highlight_values: Vec<f64>,
    pub found_index: Option<usize>,
    pub found_value: Option<f64>,
    /// Keep the adapter's scroll position instead of jumping back to the start
    pub preserve_scroll: bool,
}

impl RenderOptions {
    pub fn highlight_index(index: usize) -> Self {
        RenderOptions {
            highlight_indices: vec![index],
            ..Default::default()
        }
    }

    pub fn highlight_value(value: f64) -> Self {
        RenderOptions {
            highlight_values: vec![value],
            ..Default::default()
        }
    }

    pub fn found_at(index: usize) -> Self {
        RenderOptions {
            found_index: Some(index),
            ..Default::default()
        }
    }

    pub fn found(value: f64) -> Self {
        RenderOptions {
            found_value: Some(value),
            ..Default::default()
        }
    }

    pub fn preserving_scroll(mut self) -> Self {
        self.preserve_scroll = true;
        self
    }

    pub fn is_highlighted_index(&self, index: usize) -> bool {
        self.highlight_indices.contains(&index)
    }

    pub fn is_highlighted_value(&self, value: f64) -> bool {
        self.highlight_values.contains(&value)
    }

    pub fn is_found_index(&self, index: usize) -> bool {
        self.found_index == Some(index)
    }

    pub fn is_found_value(&self, value: f64) -> bool {
        self.found_value == Some(value)
    }
}

/// Everything an adapter needs to draw the current structure
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub kind: StructureKind,
    pub data: RenderData,
    pub options: RenderOptions,
    /// Set only for the binary heap
    pub heap_mode: Option<HeapMode>,
    /// Incremented on every render request
    pub serial: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_builders() {
        let options = RenderOptions::highlight_index(2).preserving_scroll();
        assert!(options.is_highlighted_index(2));
        assert!(!options.is_highlighted_index(1));
        assert!(options.preserve_scroll);
        assert_eq!(options.found_index, None);

        let found = RenderOptions::found(4.5);
        assert!(found.is_found_value(4.5));
        assert!(found.highlight_values.is_empty());
        assert!(RenderOptions::found_at(0).is_found_index(0));
    }

    #[test]
    fn test_render_data_emptiness() {
        assert!(RenderData::Sequence(vec![]).is_empty());
        assert!(RenderData::Tree(None).is_empty());
        assert!(!RenderData::Tree(Some(TreeShape::leaf(1.0))).is_empty());
    }
}
