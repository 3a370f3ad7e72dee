//! Child-index paths into document trees.
//!
//! A path is the sequence of child indices to descend, level by level, from
//! the document root to a target node. The empty path is the root itself;
//! "no such node" is `None`, which is a different outcome.
//!
//! Resolution comes in two deliberately separate flavors: [`resolve_in`]
//! searches the live tree by node *identity*, [`resolve_in_json`] searches a
//! serialized tree by *structural equality*. They traverse identically
//! (depth-first, children in defined order, first match wins) but behave
//! differently when a tree contains structurally equal duplicates, so they
//! stay two named operations instead of one overloaded one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::DocNode;

/// A resolved location in a document tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The path of the document root: no descent at all.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Follow the path through a serialized tree.
    pub fn descend_json<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut node = root;
        for &index in &self.0 {
            node = json_children(node).get(index)?;
        }
        Some(node)
    }

    /// Follow the path through a live tree.
    pub fn descend<N: DocNode>(&self, root: &N) -> Option<N> {
        let mut node = root.clone();
        for &index in &self.0 {
            node = node.child(index)?;
        }
        Some(node)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Locate `target` inside the live tree rooted at `root` by node identity.
pub fn resolve_in<N: DocNode>(root: &N, target: &N) -> Option<NodePath> {
    let mut path = Vec::new();
    if search_live(root, target, &mut path) {
        Some(NodePath(path))
    } else {
        None
    }
}

/// Locate `target` inside the serialized tree rooted at `root` by deep
/// structural equality. With duplicate subtrees the first match in
/// depth-first order wins.
pub fn resolve_in_json(root: &Value, target: &Value) -> Option<NodePath> {
    let mut path = Vec::new();
    if search_json(root, target, &mut path) {
        Some(NodePath(path))
    } else {
        None
    }
}

fn search_live<N: DocNode>(node: &N, target: &N, path: &mut Vec<usize>) -> bool {
    if node.same_node(target) {
        return true;
    }
    for index in 0..node.child_count() {
        if let Some(child) = node.child(index) {
            path.push(index);
            if search_live(&child, target, path) {
                return true;
            }
            path.pop();
        }
    }
    false
}

fn search_json(node: &Value, target: &Value, path: &mut Vec<usize>) -> bool {
    if node == target {
        return true;
    }
    for (index, child) in json_children(node).iter().enumerate() {
        path.push(index);
        if search_json(child, target, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Children of a serialized node: its `"content"` array, or nothing.
pub(crate) fn json_children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
