//! Unbalanced binary search tree
//!
//! Nodes are owned by their parent link (`Option<Box<BstNode>>`), so the
//! tree is acyclic by construction. No rebalancing is done; inserting sorted
//! input degenerates the tree into a list.
//!
//! Deleting a node with two children keeps the node itself and overwrites
//! its value with the in-order successor, then unlinks the successor node.

use super::errors::StructureError;
use super::payload::{Payload, TreeShape, MAX_SHAPE_DEPTH};
use super::tree::{self, BinaryNode};
use super::Structure;
use std::fmt;

#[derive(Debug)]
pub struct BstNode {
    pub value: f64,
    pub left: Option<Box<BstNode>>,
    pub right: Option<Box<BstNode>>,
}

impl BstNode {
    fn new(value: f64) -> Self {
        BstNode {
            value,
            left: None,
            right: None,
        }
    }

    fn to_shape(&self) -> TreeShape {
        tree::fold_tree(self, |value, left, right| TreeShape { value, left, right })
            .unwrap_or_else(|| TreeShape::leaf(self.value))
    }

    fn from_shape(shape: &TreeShape) -> Self {
        tree::fold_tree(shape, |value, left, right| BstNode { value, left, right })
            .unwrap_or_else(|| BstNode::new(shape.value))
    }
}

impl BinaryNode for BstNode {
    fn value(&self) -> f64 {
        self.value
    }

    fn children(&self) -> (Option<&Self>, Option<&Self>) {
        (self.left.as_deref(), self.right.as_deref())
    }

    fn take_children(&mut self) -> (Option<Box<Self>>, Option<Box<Self>>) {
        (self.left.take(), self.right.take())
    }
}

impl Clone for BstNode {
    fn clone(&self) -> Self {
        tree::fold_tree(self, |value, left, right| BstNode { value, left, right })
            .unwrap_or_else(|| BstNode::new(self.value))
    }
}

impl PartialEq for BstNode {
    fn eq(&self, other: &Self) -> bool {
        tree::same_shape(self, other)
    }
}

impl Drop for BstNode {
    fn drop(&mut self) {
        tree::dismantle(self);
    }
}

/// Depth-first or breadth-first visiting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Pre,
    In,
    Post,
    Level,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::In,
        TraversalOrder::Pre,
        TraversalOrder::Post,
        TraversalOrder::Level,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TraversalOrder::Pre => "pre",
            TraversalOrder::In => "in",
            TraversalOrder::Post => "post",
            TraversalOrder::Level => "level",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descent path plus the outcome of an insert or delete
#[derive(Debug, Clone, PartialEq)]
pub struct BstTrace {
    pub path: Vec<f64>,
    pub result: Result<(), StructureError>,
}

impl BstTrace {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BstSearch {
    pub found: bool,
    pub path: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BstStructure {
    root: Option<Box<BstNode>>,
}

impl BstStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert each value in order, skipping duplicates
    pub fn from_values(values: &[f64]) -> Self {
        let mut tree = Self::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    pub fn root(&self) -> Option<&BstNode> {
        self.root.as_deref()
    }

    /// Attach `value` as a new leaf; the path ends with the inserted value
    pub fn insert(&mut self, value: f64) -> BstTrace {
        let mut path = Vec::new();
        let mut link = &mut self.root;
        while let Some(node) = link {
            path.push(node.value);
            if value == node.value {
                return BstTrace {
                    path,
                    result: Err(StructureError::DuplicateValue { value }),
                };
            }
            link = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(BstNode::new(value)));
        path.push(value);
        BstTrace { path, result: Ok(()) }
    }

    pub fn search(&self, value: f64) -> BstSearch {
        let mut path = Vec::new();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            path.push(node.value);
            if value == node.value {
                return BstSearch { found: true, path };
            }
            current = if value < node.value {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        BstSearch { found: false, path }
    }

    pub fn delete(&mut self, value: f64) -> BstTrace {
        let mut path = Vec::new();
        let result = if delete_from(&mut self.root, value, &mut path) {
            Ok(())
        } else {
            Err(StructureError::ValueNotFound { value })
        };
        BstTrace { path, result }
    }

    pub fn traverse(&self, order: TraversalOrder) -> Vec<f64> {
        self.root
            .as_deref()
            .map_or_else(Vec::new, |root| tree::walk(root, order))
    }

    pub fn to_shape(&self) -> Option<TreeShape> {
        self.root.as_ref().map(|root| root.to_shape())
    }

    pub fn height(&self) -> usize {
        tree::height(self.root.as_deref())
    }
}

fn delete_from(mut link: &mut Option<Box<BstNode>>, target: f64, path: &mut Vec<f64>) -> bool {
    loop {
        let Some(node) = link.as_deref() else {
            return false;
        };
        path.push(node.value);
        if target == node.value {
            break;
        }
        let go_left = target < node.value;
        let Some(node) = link else {
            return false;
        };
        link = if go_left {
            &mut node.left
        } else {
            &mut node.right
        };
    }

    let Some(node) = link else {
        return false;
    };
    if node.left.is_some() && node.right.is_some() {
        if let Some(successor) = take_leftmost(&mut node.right) {
            node.value = successor;
        }
    } else {
        let child = node.left.take().or_else(|| node.right.take());
        *link = child;
    }
    true
}

/// Unlink the leftmost node under `link`, splicing in its right child
fn take_leftmost(mut link: &mut Option<Box<BstNode>>) -> Option<f64> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }
    let mut node = link.take()?;
    *link = node.right.take();
    Some(node.value)
}

impl Structure for BstStructure {
    fn len(&self) -> usize {
        tree::count(self.root.as_deref())
    }

    fn clear(&mut self) {
        self.root = None;
    }

    /// Level-order values
    fn to_vec(&self) -> Vec<f64> {
        self.traverse(TraversalOrder::Level)
    }

    /// Level-order values always; the nested shape only while it stays shallow
    ///
    /// Replaying level order through `insert` rebuilds the same tree, so a
    /// degenerate tree loses nothing by leaving `tree` out.
    fn serialize(&self) -> Payload {
        let shape = if self.height() <= MAX_SHAPE_DEPTH {
            self.to_shape()
        } else {
            None
        };
        Payload::from_values(self.to_vec()).with_tree(shape)
    }

    /// Rebuild from the exact shape when present, else by repeated insert
    ///
    /// The current tree is only replaced when the whole payload is accepted.
    fn load(&mut self, payload: &Payload) -> bool {
        if let Some(shape) = &payload.tree {
            if !shape.is_ordered() {
                return false;
            }
            self.root = Some(Box::new(BstNode::from_shape(shape)));
            return true;
        }

        let mut rebuilt = BstStructure::new();
        for &value in &payload.values {
            if !rebuilt.insert(value).succeeded() {
                return false;
            }
        }
        *self = rebuilt;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BstStructure {
        BstStructure::from_values(&[5.0, 3.0, 7.0, 2.0, 4.0, 6.0, 8.0])
    }

    #[test]
    fn test_traversals() {
        let tree = sample();
        assert_eq!(
            tree.traverse(TraversalOrder::In),
            vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
        assert_eq!(
            tree.traverse(TraversalOrder::Pre),
            vec![5.0, 3.0, 2.0, 4.0, 7.0, 6.0, 8.0]
        );
        assert_eq!(
            tree.traverse(TraversalOrder::Post),
            vec![2.0, 4.0, 3.0, 6.0, 8.0, 7.0, 5.0]
        );
        assert_eq!(
            tree.traverse(TraversalOrder::Level),
            vec![5.0, 3.0, 7.0, 2.0, 4.0, 6.0, 8.0]
        );
    }

    #[test]
    fn test_insert_path_and_duplicate() {
        let mut tree = sample();
        let trace = tree.insert(4.5);
        assert_eq!(trace.path, vec![5.0, 3.0, 4.0, 4.5]);
        assert!(trace.succeeded());

        let before = tree.traverse(TraversalOrder::In);
        let dup = tree.insert(7.0);
        assert_eq!(dup.path, vec![5.0, 7.0]);
        assert_eq!(
            dup.result,
            Err(StructureError::DuplicateValue { value: 7.0 })
        );
        assert_eq!(tree.traverse(TraversalOrder::In), before);
    }

    #[test]
    fn test_search_path() {
        let tree = sample();
        let hit = tree.search(6.0);
        assert!(hit.found);
        assert_eq!(hit.path, vec![5.0, 7.0, 6.0]);

        let miss = tree.search(10.0);
        assert!(!miss.found);
        assert_eq!(miss.path, vec![5.0, 7.0, 8.0]);
    }

    #[test]
    fn test_delete_leaf_and_one_child() {
        let mut tree = sample();
        assert!(tree.delete(2.0).succeeded());
        assert_eq!(
            tree.traverse(TraversalOrder::In),
            vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
        assert!(tree.delete(3.0).succeeded());
        assert_eq!(
            tree.traverse(TraversalOrder::Level),
            vec![5.0, 4.0, 7.0, 6.0, 8.0]
        );
    }

    #[test]
    fn test_delete_two_children_keeps_node_position() {
        let mut tree = sample();
        let trace = tree.delete(5.0);
        assert_eq!(trace.path, vec![5.0]);
        assert_eq!(tree.root().map(|n| n.value), Some(6.0));
        assert_eq!(
            tree.traverse(TraversalOrder::Level),
            vec![6.0, 3.0, 7.0, 2.0, 4.0, 8.0]
        );

        // Successor is the direct right child
        let mut tree = BstStructure::from_values(&[5.0, 3.0, 7.0, 8.0]);
        tree.delete(5.0);
        assert_eq!(tree.traverse(TraversalOrder::Pre), vec![7.0, 3.0, 8.0]);
    }

    #[test]
    fn test_delete_missing() {
        let mut tree = sample();
        let trace = tree.delete(100.0);
        assert_eq!(trace.path, vec![5.0, 7.0, 8.0]);
        assert_eq!(
            trace.result,
            Err(StructureError::ValueNotFound { value: 100.0 })
        );
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_payload_roundtrip_preserves_shape() {
        let mut tree = BstStructure::from_values(&[1.0, 2.0, 3.0]);
        tree.delete(1.0);
        let payload = tree.serialize();
        assert_eq!(payload.values, vec![2.0, 3.0]);

        let mut restored = BstStructure::new();
        assert!(restored.load(&payload));
        assert_eq!(restored, tree);
        assert_eq!(restored.height(), 2);
    }

    #[test]
    fn test_values_only_load_rejects_duplicates() {
        let mut tree = BstStructure::from_values(&[9.0]);
        assert!(!tree.load(&Payload::from_values(vec![1.0, 2.0, 1.0])));
        assert_eq!(tree.to_vec(), vec![9.0]);

        assert!(tree.load(&Payload::from_values(vec![2.0, 1.0, 3.0])));
        assert_eq!(tree.to_vec(), vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_unordered_shape_is_rejected() {
        let mut shape = TreeShape::leaf(5.0);
        shape.left = Some(Box::new(TreeShape::leaf(9.0)));
        let mut tree = BstStructure::new();
        assert!(!tree.load(&Payload::from_values(vec![]).with_tree(Some(shape))));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_sorted_inserts_build_a_deep_chain() {
        // Small stack so any recursive walk over the chain would overflow
        let worker = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| {
                let values: Vec<f64> = (0..20_000).map(f64::from).collect();
                let mut tree = BstStructure::from_values(&values);
                assert_eq!(tree.len(), 20_000);
                assert_eq!(tree.height(), 20_000);
                assert_eq!(tree.traverse(TraversalOrder::In), values);
                assert_eq!(tree.traverse(TraversalOrder::Post).first(), Some(&19_999.0));
                assert_eq!(tree.to_shape().map(|s| s.preorder_values()), Some(values.clone()));

                let copy = tree.clone();
                assert!(copy == tree);

                let payload = tree.serialize();
                assert!(payload.tree.is_none());
                let mut restored = BstStructure::new();
                assert!(restored.load(&payload));
                assert!(restored == tree);

                assert!(tree.delete(0.0).succeeded());
                assert!(tree.delete(19_999.0).succeeded());
                assert_eq!(tree.len(), 19_998);
                tree.clear();
                assert!(tree.is_empty());
            })
            .unwrap();
        worker.join().unwrap();
    }

    #[test]
    fn test_shallow_tree_keeps_shape_in_payload() {
        let tree = sample();
        assert_eq!(tree.serialize().tree, tree.to_shape());
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = BstStructure::new();
        assert!(tree.traverse(TraversalOrder::Level).is_empty());
        assert!(!tree.search(1.0).found);
        assert!(!tree.delete(1.0).succeeded());
        assert_eq!(tree.serialize(), Payload::default());
    }
}
