//! Interaction marker trees
//!
//! The field store reports which fields were touched or dirtied as a nested
//! tree mirroring the form's value shape. Leaves are booleans, object fields
//! are branches, array fields are lists. The core only ever reads snapshots of
//! these trees; anything that is not a boolean, branch or list is kept as
//! [`MarkerTree::Opaque`] and never counts as a mark.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FieldPath;

/// Snapshot of touched or dirty markers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum MarkerTree {
    /// Leaf marker
    Flag(bool),
    /// Object field, keys in store insertion order
    Branch(IndexMap<String, MarkerTree>),
    /// Array field, one entry per element
    List(Vec<MarkerTree>),
    /// Unrecognized leaf
    Opaque,
}

impl Default for MarkerTree {
    fn default() -> Self {
        MarkerTree::empty()
    }
}

impl MarkerTree {
    /// An empty branch
    pub fn empty() -> Self {
        MarkerTree::Branch(IndexMap::new())
    }

    /// Build a tree marking every given path
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        let mut tree = MarkerTree::empty();
        for path in paths {
            tree.mark(&path.into());
        }
        tree
    }

    /// Branch or list without children
    pub fn is_empty(&self) -> bool {
        match self {
            MarkerTree::Branch(children) => children.is_empty(),
            MarkerTree::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Does this node or any descendant carry a `true` leaf?
    pub fn has_marks(&self) -> bool {
        match self {
            MarkerTree::Flag(flag) => *flag,
            MarkerTree::Branch(children) => children.values().any(MarkerTree::has_marks),
            MarkerTree::List(items) => items.iter().any(MarkerTree::has_marks),
            MarkerTree::Opaque => false,
        }
    }

    /// Look up the node at `path`
    pub fn get(&self, path: &FieldPath) -> Option<&MarkerTree> {
        let mut node = self;
        for segment in path.segments() {
            node = match node {
                MarkerTree::Branch(children) => children.get(segment)?,
                MarkerTree::List(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Is the field at `path` marked? Object fields count as marked when any
    /// nested field is.
    pub fn is_marked(&self, path: &FieldPath) -> bool {
        self.get(path).is_some_and(MarkerTree::has_marks)
    }

    /// Set a `true` leaf at `path`, creating intermediate branches
    pub fn mark(&mut self, path: &FieldPath) {
        let segments: Vec<&str> = path.segments().collect();
        if segments.is_empty() {
            return;
        }
        self.mark_segments(&segments);
    }

    fn mark_segments(&mut self, segments: &[&str]) {
        let Some((head, rest)) = segments.split_first() else {
            *self = MarkerTree::Flag(true);
            return;
        };

        if let MarkerTree::List(items) = self {
            if let Ok(index) = head.parse::<usize>() {
                if items.len() <= index {
                    items.resize(index + 1, MarkerTree::Opaque);
                }
                items[index].mark_segments(rest);
                return;
            }
        }

        if !matches!(self, MarkerTree::Branch(_)) {
            *self = MarkerTree::empty();
        }
        if let MarkerTree::Branch(children) = self {
            children
                .entry((*head).to_string())
                .or_insert(MarkerTree::Opaque)
                .mark_segments(rest);
        }
    }

    /// Remove the node at `path`, pruning branches left empty
    pub fn clear(&mut self, path: &FieldPath) -> bool {
        let segments: Vec<&str> = path.segments().collect();
        if segments.is_empty() {
            let had_marks = self.has_marks();
            *self = MarkerTree::empty();
            return had_marks;
        }
        self.clear_segments(&segments)
    }

    fn clear_segments(&mut self, segments: &[&str]) -> bool {
        let Some((head, rest)) = segments.split_first() else {
            return false;
        };

        match self {
            MarkerTree::Branch(children) => {
                if rest.is_empty() {
                    return children.shift_remove(*head).is_some();
                }
                let Some(child) = children.get_mut(*head) else {
                    return false;
                };
                let removed = child.clear_segments(rest);
                if child.is_empty() {
                    children.shift_remove(*head);
                }
                removed
            }
            MarkerTree::List(items) => {
                let Some(item) = head.parse::<usize>().ok().and_then(|i| items.get_mut(i)) else {
                    return false;
                };
                if rest.is_empty() {
                    // Keep list positions stable
                    let removed = item.has_marks();
                    *item = MarkerTree::Flag(false);
                    return removed;
                }
                item.clear_segments(rest)
            }
            _ => false,
        }
    }
}

impl From<Value> for MarkerTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(flag) => MarkerTree::Flag(flag),
            Value::Object(map) => MarkerTree::Branch(
                map.into_iter()
                    .map(|(k, v)| (k, MarkerTree::from(v)))
                    .collect(),
            ),
            Value::Array(items) => MarkerTree::List(items.into_iter().map(MarkerTree::from).collect()),
            _ => MarkerTree::Opaque,
        }
    }
}

impl From<MarkerTree> for Value {
    fn from(tree: MarkerTree) -> Self {
        match tree {
            MarkerTree::Flag(flag) => Value::Bool(flag),
            MarkerTree::Branch(children) => Value::Object(
                children
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
            MarkerTree::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            MarkerTree::Opaque => Value::Null,
        }
    }
}
