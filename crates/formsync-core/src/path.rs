//! Field path types
//!
//! A field path is the dotted address of a form field (`address.city`,
//! `items.0.name`). A [`FieldPathSet`] is the ordered, duplicate-free list of
//! paths handed to a validator in one revalidation request.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// Dotted field path
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        FieldPath(path.into())
    }

    /// The empty path, addressing the whole form
    #[inline]
    pub fn root() -> Self {
        FieldPath(String::new())
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Append a segment
    pub fn child(&self, segment: &str) -> FieldPath {
        if self.is_root() {
            FieldPath(segment.to_string())
        } else {
            FieldPath(format!("{}{}{}", self.0, PATH_SEPARATOR, segment))
        }
    }

    /// Append a list index segment
    pub fn index(&self, index: usize) -> FieldPath {
        self.child(&index.to_string())
    }

}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({})", self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        FieldPath(s.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        FieldPath(s)
    }
}

impl From<&FieldPath> for FieldPath {
    fn from(p: &FieldPath) -> Self {
        p.clone()
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Ordered set of field paths selected for revalidation.
///
/// Each path appears at most once. Order is the order paths were selected in
/// and is kept stable so that identical inputs produce identical requests.
#[derive(Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldPathSet {
    paths: Vec<FieldPath>,
}

impl FieldPathSet {
    pub fn new() -> Self {
        FieldPathSet::default()
    }

    /// Insertion-ordered union: `first`'s paths, then unseen paths of `second`.
    /// Repeats within either list collapse to their first occurrence.
    pub fn union(first: Vec<FieldPath>, second: Vec<FieldPath>) -> Self {
        let set: IndexSet<FieldPath> = first.into_iter().chain(second).collect();
        FieldPathSet {
            paths: set.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p.as_str() == path)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldPath> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[FieldPath] {
        &self.paths
    }

    pub fn into_vec(self) -> Vec<FieldPath> {
        self.paths
    }

    /// Paths as plain strings, in order
    pub fn to_strings(&self) -> Vec<String> {
        self.paths.iter().map(|p| p.to_string()).collect()
    }
}

impl fmt::Debug for FieldPathSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.paths.iter().map(|p| p.as_str())).finish()
    }
}

impl FromIterator<FieldPath> for FieldPathSet {
    fn from_iter<I: IntoIterator<Item = FieldPath>>(iter: I) -> Self {
        let set: IndexSet<FieldPath> = iter.into_iter().collect();
        FieldPathSet {
            paths: set.into_iter().collect(),
        }
    }
}

impl IntoIterator for FieldPathSet {
    type Item = FieldPath;
    type IntoIter = std::vec::IntoIter<FieldPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldPathSet {
    type Item = &'a FieldPath;
    type IntoIter = std::slice::Iter<'a, FieldPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
