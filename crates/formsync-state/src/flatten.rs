//! Field-path flattener

use formsync_core::{FieldPath, MarkerTree};

/// Dotted paths of every `true` leaf, depth-first in tree order.
///
/// Only leaves strictly equal to `true` are emitted; `false` and opaque leaves
/// are skipped. List elements contribute their index as a segment.
pub fn flatten(tree: &MarkerTree) -> Vec<FieldPath> {
    let mut out = Vec::new();
    flatten_into(tree, &FieldPath::root(), &mut out);
    out
}

/// Append the marked paths below `prefix` to `out`
pub fn flatten_into(tree: &MarkerTree, prefix: &FieldPath, out: &mut Vec<FieldPath>) {
    match tree {
        MarkerTree::Flag(true) => {
            // A bare root flag names no field
            if !prefix.is_root() {
                out.push(prefix.clone());
            }
        }
        MarkerTree::Flag(false) | MarkerTree::Opaque => {}
        MarkerTree::Branch(children) => {
            for (key, child) in children {
                flatten_into(child, &prefix.child(key), out);
            }
        }
        MarkerTree::List(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(item, &prefix.index(index), out);
            }
        }
    }
}
