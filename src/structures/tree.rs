//! Iterative walks over boxed binary trees
//!
//! Sorted input turns the BST into a chain as deep as it is long, so nothing
//! here recurses: every walk keeps its own stack on the heap. Both
//! [`BstNode`](super::bst::BstNode) and [`TreeShape`](super::payload::TreeShape)
//! implement [`BinaryNode`] and share these helpers, including their `Drop`.

use super::bst::TraversalOrder;
use std::collections::VecDeque;

pub trait BinaryNode: Sized {
    fn value(&self) -> f64;

    fn children(&self) -> (Option<&Self>, Option<&Self>);

    /// Detach both subtrees, leaving a leaf
    fn take_children(&mut self) -> (Option<Box<Self>>, Option<Box<Self>>);
}

/// Values in the given order
pub fn walk<N: BinaryNode>(root: &N, order: TraversalOrder) -> Vec<f64> {
    let mut out = Vec::new();
    match order {
        TraversalOrder::Pre => {
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                out.push(node.value());
                let (left, right) = node.children();
                stack.extend(right);
                stack.extend(left);
            }
        }
        TraversalOrder::In => {
            out = in_order_depths(root).into_iter().map(|(value, _)| value).collect();
        }
        TraversalOrder::Post => {
            // Node, right, left reversed
            let mut stack = vec![root];
            while let Some(node) = stack.pop() {
                out.push(node.value());
                let (left, right) = node.children();
                stack.extend(left);
                stack.extend(right);
            }
            out.reverse();
        }
        TraversalOrder::Level => {
            let mut queue = VecDeque::from([root]);
            while let Some(node) = queue.pop_front() {
                out.push(node.value());
                let (left, right) = node.children();
                queue.extend(left);
                queue.extend(right);
            }
        }
    }
    out
}

/// In-order values paired with their depth (root is 0)
pub fn in_order_depths<N: BinaryNode>(root: &N) -> Vec<(f64, usize)> {
    let mut out = Vec::new();
    let mut stack: Vec<(&N, usize)> = Vec::new();
    let mut current = Some((root, 0));
    loop {
        while let Some((node, depth)) = current {
            stack.push((node, depth));
            current = node.children().0.map(|left| (left, depth + 1));
        }
        let Some((node, depth)) = stack.pop() else {
            break;
        };
        out.push((node.value(), depth));
        current = node.children().1.map(|right| (right, depth + 1));
    }
    out
}

pub fn count<N: BinaryNode>(root: Option<&N>) -> usize {
    let mut stack: Vec<&N> = root.into_iter().collect();
    let mut total = 0;
    while let Some(node) = stack.pop() {
        total += 1;
        let (left, right) = node.children();
        stack.extend(left);
        stack.extend(right);
    }
    total
}

/// Number of levels; an empty tree has height 0
pub fn height<N: BinaryNode>(root: Option<&N>) -> usize {
    let mut stack: Vec<(&N, usize)> = root.map(|node| (node, 1)).into_iter().collect();
    let mut deepest = 0;
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        let (left, right) = node.children();
        stack.extend(left.map(|n| (n, depth + 1)));
        stack.extend(right.map(|n| (n, depth + 1)));
    }
    deepest
}

/// Rebuild a tree bottom-up, calling `make` once per node in post-order
pub fn fold_tree<N, T>(
    root: &N,
    mut make: impl FnMut(f64, Option<Box<T>>, Option<Box<T>>) -> T,
) -> Option<T>
where
    N: BinaryNode,
{
    let mut pending = vec![(root, false)];
    let mut built: Vec<T> = Vec::new();
    while let Some((node, expanded)) = pending.pop() {
        let (left, right) = node.children();
        if expanded {
            // Left subtree was finished first, so the right one is on top
            let right = right.and_then(|_| built.pop()).map(Box::new);
            let left = left.and_then(|_| built.pop()).map(Box::new);
            built.push(make(node.value(), left, right));
        } else {
            pending.push((node, true));
            pending.extend(right.map(|n| (n, false)));
            pending.extend(left.map(|n| (n, false)));
        }
    }
    built.pop()
}

/// Same values in the same positions
pub fn same_shape<N: BinaryNode>(a: &N, b: &N) -> bool {
    let mut stack = vec![(a, b)];
    while let Some((a, b)) = stack.pop() {
        if a.value() != b.value() {
            return false;
        }
        let ((a_left, a_right), (b_left, b_right)) = (a.children(), b.children());
        for pair in [(a_left, b_left), (a_right, b_right)] {
            match pair {
                (Some(a), Some(b)) => stack.push((a, b)),
                (None, None) => {}
                _ => return false,
            }
        }
    }
    true
}

/// Free every descendant of `node` without recursing through `Drop`
pub fn dismantle<N: BinaryNode>(node: &mut N) {
    let (left, right) = node.take_children();
    let mut stack: Vec<Box<N>> = left.into_iter().chain(right).collect();
    while let Some(mut next) = stack.pop() {
        let (left, right) = next.take_children();
        stack.extend(left);
        stack.extend(right);
    }
}
