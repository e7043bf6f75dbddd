//! Serialization contract shared by every engine
//!
//! A [`Payload`] is what an engine exports and what it accepts back on load:
//!
//! ```text
//! { "values": [5, 3, 8], "mode": "max", "tree": { "value": 5, "left": ..., "right": ... } }
//! ```
//!
//! `mode` is only written by the binary heap and `tree` only by the BST. Stored
//! payloads written by older clients come in looser shapes, so
//! [`normalize_payload`] accepts all of them and validates every value.

use super::bst::TraversalOrder;
use super::tree::{self, BinaryNode};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;

/// Ordering mode of the binary heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeapMode {
    #[default]
    Min,
    Max,
}

impl HeapMode {
    pub fn as_str(self) -> &'static str {
        match self {
            HeapMode::Min => "min",
            HeapMode::Max => "max",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            HeapMode::Min => HeapMode::Max,
            HeapMode::Max => HeapMode::Min,
        }
    }

    /// Whether `a` belongs above `b` in a heap of this mode
    pub fn prefers(self, a: f64, b: f64) -> bool {
        match self {
            HeapMode::Min => a < b,
            HeapMode::Max => a > b,
        }
    }
}

impl fmt::Display for HeapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deepest BST shape written into a payload
///
/// Deeper trees are saved as level-order values only, which keeps the nested
/// JSON well inside `serde_json`'s recursion limit.
pub const MAX_SHAPE_DEPTH: usize = 64;

/// Recursive BST shape with nullable children
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeShape {
    pub value: f64,
    #[serde(default)]
    pub left: Option<Box<TreeShape>>,
    #[serde(default)]
    pub right: Option<Box<TreeShape>>,
}

impl TreeShape {
    pub fn leaf(value: f64) -> Self {
        TreeShape {
            value,
            left: None,
            right: None,
        }
    }

    /// Values in pre-order (node, left, right)
    pub fn preorder_values(&self) -> Vec<f64> {
        tree::walk(self, TraversalOrder::Pre)
    }

    /// Check the strict BST ordering of the whole shape
    pub fn is_ordered(&self) -> bool {
        let mut stack: Vec<(&TreeShape, Option<f64>, Option<f64>)> = vec![(self, None, None)];
        while let Some((node, low, high)) = stack.pop() {
            if !node.value.is_finite() {
                return false;
            }
            if low.is_some_and(|low| node.value <= low)
                || high.is_some_and(|high| node.value >= high)
            {
                return false;
            }
            stack.extend(node.left.as_deref().map(|left| (left, low, Some(node.value))));
            stack.extend(node.right.as_deref().map(|right| (right, Some(node.value), high)));
        }
        true
    }
}

impl BinaryNode for TreeShape {
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

impl Clone for TreeShape {
    fn clone(&self) -> Self {
        tree::fold_tree(self, |value, left, right| TreeShape { value, left, right })
            .unwrap_or_else(|| TreeShape::leaf(self.value))
    }
}

impl PartialEq for TreeShape {
    fn eq(&self, other: &Self) -> bool {
        tree::same_shape(self, other)
    }
}

impl Drop for TreeShape {
    fn drop(&mut self) {
        tree::dismantle(self);
    }
}

/// Exported contents of one engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Payload {
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<HeapMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeShape>,
}

impl Payload {
    pub fn from_values(values: Vec<f64>) -> Self {
        Payload {
            values,
            mode: None,
            tree: None,
        }
    }

    pub fn with_mode(mut self, mode: HeapMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_tree(mut self, tree: Option<TreeShape>) -> Self {
        self.tree = tree;
        self
    }

    pub fn to_json(&self) -> Json {
        // Plain derived struct of numbers and strings, serialization cannot fail
        serde_json::to_value(self).unwrap_or(Json::Null)
    }
}

/// Parse a token against the strict numeric pattern `[+-]?digits(.digits)?`
///
/// Digit runs too long for an `f64` are rejected rather than read as infinity.
pub fn parse_number(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    let unsigned = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed);

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || fraction.is_some_and(|f| !all_digits(f)) {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn json_number(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Json::String(s) => parse_number(s),
        _ => None,
    }
}

/// Bring a stored payload of any accepted shape into a [`Payload`]
///
/// Accepted shapes: a bare array, `{values: [...]}`, `{payload: [...]}`, or
/// `{tree: {...}}` (values collected in pre-order). Returns `None` when no
/// value list can be found, when any value is not numeric, or when a `tree`
/// is present but malformed.
pub fn normalize_payload(raw: &Json) -> Option<Payload> {
    match raw {
        Json::Array(items) => items
            .iter()
            .map(json_number)
            .collect::<Option<Vec<_>>>()
            .map(Payload::from_values),
        Json::Object(map) => {
            let tree = match map.get("tree") {
                None | Some(Json::Null) => None,
                Some(tree) => Some(serde_json::from_value::<TreeShape>(tree.clone()).ok()?),
            };

            let listed = map
                .get("values")
                .and_then(Json::as_array)
                .or_else(|| map.get("payload").and_then(Json::as_array));

            let values = match (listed, &tree) {
                (Some(items), _) => items.iter().map(json_number).collect::<Option<Vec<_>>>()?,
                (None, Some(tree)) => tree.preorder_values(),
                (None, None) => return None,
            };

            let mode = map.get("mode").map(|mode| match mode.as_str() {
                Some("max") => HeapMode::Max,
                _ => HeapMode::Min,
            });

            Some(Payload { values, mode, tree })
        }
        _ => None,
    }
}
