//! Shared test fixtures: a small in-memory editor host and view layer
//! implementing the `host` and `render` contracts. Test doubles only; they
//! model just enough of an editor to exercise the inspector.


use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::diff::Delta;
use crate::host::{DocNode, EditorHost, EditorState, HostError, TransitionTags};
use crate::inspect::Inspector;
use crate::render::{Owned, OwnerKind, Rect, ViewLayer};

/// A live tree node. Identity is the `Rc` allocation, so structurally equal
/// siblings are still distinct nodes.
#[derive(Debug, Clone)]
pub struct MemNode(Rc<MemNodeData>);

#[derive(Debug)]
struct MemNodeData {
    kind: String,
    text: Option<String>,
    children: Vec<MemNode>,
}

impl MemNode {
    pub fn branch(kind: &str, children: Vec<MemNode>) -> Self {
        Self(Rc::new(MemNodeData {
            kind: kind.to_string(),
            text: None,
            children,
        }))
    }

    pub fn text(text: &str) -> Self {
        Self(Rc::new(MemNodeData {
            kind: "text".to_string(),
            text: Some(text.to_string()),
            children: Vec::new(),
        }))
    }

    pub fn to_json(&self) -> Value {
        let mut node = json!({ "type": self.0.kind });
        if let Some(text) = &self.0.text {
            node["text"] = json!(text);
        }
        if !self.0.children.is_empty() {
            node["content"] = Value::Array(self.0.children.iter().map(MemNode::to_json).collect());
        }
        node
    }

    pub fn from_json(value: &Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let text = value.get("text").and_then(Value::as_str);
        let children = value
            .get("content")
            .and_then(Value::as_array)
            .map(|children| children.iter().map(MemNode::from_json).collect())
            .unwrap_or_default();
        Self(Rc::new(MemNodeData {
            kind: kind.to_string(),
            text: text.map(str::to_string),
            children,
        }))
    }

    fn preorder(&self) -> Vec<MemNode> {
        let mut nodes = Vec::new();
        fn collect(node: &MemNode, nodes: &mut Vec<MemNode>) {
            nodes.push(node.clone());
            for child in &node.0.children {
                collect(child, nodes);
            }
        }
        collect(self, &mut nodes);
        nodes
    }
}

impl DocNode for MemNode {
    fn child_count(&self) -> usize {
        self.0.children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.0.children.get(index).cloned()
    }

    fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Identity is the `Rc` allocation, matching [`MemNode::same_node`].
impl PartialEq for MemNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Document positions in the fixture are preorder indices (root = 0).
pub fn preorder_pos(root: &MemNode, target: &MemNode) -> Option<usize> {
    root.preorder().iter().position(|node| node.same_node(target))
}

/// A document whose children are one paragraph per string.
pub fn paragraph_doc(texts: &[&str]) -> MemNode {
    MemNode::branch(
        "doc",
        texts
            .iter()
            .map(|text| MemNode::branch("paragraph", vec![MemNode::text(text)]))
            .collect(),
    )
}

#[derive(Debug, Clone)]
pub struct MemState {
    doc: MemNode,
    selection_markup: String,
}

impl MemState {
    pub fn new(doc: MemNode) -> Self {
        Self {
            doc,
            selection_markup: String::new(),
        }
    }

    pub fn with_selection_markup(mut self, markup: &str) -> Self {
        self.selection_markup = markup.to_string();
        self
    }
}

impl EditorState for MemState {
    type Node = MemNode;

    fn doc(&self) -> MemNode {
        self.doc.clone()
    }

    fn doc_json(&self) -> Value {
        self.doc.to_json()
    }

    fn node_at(&self, pos: usize) -> Option<MemNode> {
        self.doc.preorder().get(pos).cloned()
    }

    fn selection_markup(&self) -> String {
        self.selection_markup.clone()
    }
}

/// In-memory editor host. `edit` simulates the host applying a user edit;
/// the returned state is what the host's transition event would carry.
pub struct MemHost {
    state: MemState,
    /// Tag maps attached to states pushed back in via `apply_state`.
    pub applied: Vec<TransitionTags>,
    pub focused: bool,
}

impl MemHost {
    pub fn new(doc: MemNode) -> Self {
        Self {
            state: MemState::new(doc),
            applied: Vec::new(),
            focused: false,
        }
    }

    pub fn edit(&mut self, doc: MemNode) -> MemState {
        self.state = MemState::new(doc);
        self.state.clone()
    }

    pub fn edit_with_selection(&mut self, doc: MemNode, markup: &str) -> MemState {
        self.state = MemState::new(doc).with_selection_markup(markup);
        self.state.clone()
    }
}

impl EditorHost for MemHost {
    type State = MemState;

    fn state(&self) -> &MemState {
        &self.state
    }

    fn reconstruct(&self, stored: &MemState) -> Result<MemState, HostError> {
        // Serialize and rebuild so the restored tree shares nothing with the
        // stored one.
        Ok(MemState {
            doc: MemNode::from_json(&stored.doc_json()),
            selection_markup: stored.selection_markup.clone(),
        })
    }

    fn apply_state(&mut self, state: MemState, tags: TransitionTags) -> Result<(), HostError> {
        self.state = state;
        self.applied.push(tags);
        Ok(())
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

pub type MemElement = u32;

/// In-memory view layer: tests bind elements to node or mark owners and
/// rectangles up front.
pub struct MemView {
    owners: HashMap<MemElement, Owned<MemElement, MemNode>>,
    rects: HashMap<MemElement, Rect>,
    pub scroll_top: f64,
}

impl MemView {
    pub fn new() -> Self {
        Self {
            owners: HashMap::new(),
            rects: HashMap::new(),
            scroll_top: 0.0,
        }
    }

    pub fn bind_node(&mut self, element: MemElement, node: MemNode, pos_at_start: usize, rect: Rect) {
        self.owners.insert(
            element,
            Owned {
                element,
                kind: OwnerKind::Node { node, pos_at_start },
            },
        );
        self.rects.insert(element, rect);
    }

    pub fn bind_mark(&mut self, element: MemElement, rect: Rect) {
        self.owners.insert(
            element,
            Owned {
                element,
                kind: OwnerKind::Mark,
            },
        );
        self.rects.insert(element, rect);
    }
}

impl ViewLayer for MemView {
    type Element = MemElement;
    type Node = MemNode;

    fn owner_of(&self, element: &MemElement) -> Option<Owned<MemElement, MemNode>> {
        self.owners.get(element).cloned()
    }

    fn bounding_rect(&self, element: &MemElement) -> Rect {
        self.rects.get(element).copied().unwrap_or(Rect::ZERO)
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }
}

/// An inspector over a fresh memory host whose document has one paragraph
/// per string.
pub fn mem_inspector(texts: &[&str]) -> Inspector<MemHost, MemView> {
    Inspector::new(MemHost::new(paragraph_doc(texts)), MemView::new())
}

/// Walk a delta by object keys and array indices; panics (it is a test
/// helper) when the shape does not match.
pub fn delta_at<'a>(delta: &'a Delta, path: &[&str]) -> &'a Delta {
    let mut current = delta;
    for segment in path {
        current = match current {
            Delta::Object(entries) => entries
                .get(*segment)
                .unwrap_or_else(|| panic!("no object entry {segment}")),
            Delta::Array(entries) => {
                let index: usize = segment.parse().expect("numeric array segment");
                entries
                    .changed
                    .get(&index)
                    .unwrap_or_else(|| panic!("no changed array entry {index}"))
            }
            other => panic!("cannot descend {segment} into {other:?}"),
        };
    }
    current
}

mod fixture_tests {
    use super::*;
    use crate::paths;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_round_trip_produces_an_independent_equal_tree() {
        let doc = paragraph_doc(&["one", "two"]);
        let rebuilt = MemNode::from_json(&doc.to_json());
        assert_eq!(rebuilt.to_json(), doc.to_json());
        assert!(!rebuilt.same_node(&doc));
    }

    #[test]
    fn live_resolution_distinguishes_structural_duplicates() {
        let doc = paragraph_doc(&["same", "same"]);
        let second = doc.child(1).unwrap();

        // Identity search finds the exact node even though its twin at
        // index 0 is structurally equal.
        let path = paths::resolve_in(&doc, &second).unwrap();
        assert_eq!(path.indices(), &[1]);

        // Structural search over the serialized form cannot: it stops at
        // the first equal subtree.
        let json_path = paths::resolve_in_json(&doc.to_json(), &second.to_json()).unwrap();
        assert_eq!(json_path.indices(), &[0]);
    }

    #[test]
    fn live_resolution_of_a_detached_node_is_none() {
        let doc = paragraph_doc(&["here"]);
        let detached = MemNode::text("elsewhere");
        assert!(paths::resolve_in(&doc, &detached).is_none());
    }

    #[test]
    fn paths_descend_the_live_tree_they_were_resolved_from() {
        let doc = paragraph_doc(&["one", "two"]);
        let text = doc.child(1).unwrap().child(0).unwrap();

        let path = paths::resolve_in(&doc, &text).unwrap();
        assert_eq!(path.indices(), &[1, 0]);
        assert!(path.descend(&doc).unwrap().same_node(&text));
    }

    #[test]
    fn preorder_positions_are_stable_document_positions() {
        let doc = paragraph_doc(&["a", "b"]);
        let second = doc.child(1).unwrap();
        let state = MemState::new(doc.clone());

        let pos = preorder_pos(&doc, &second).unwrap();
        assert_eq!(pos, 3);
        assert!(state.node_at(pos).unwrap().same_node(&second));
        assert_eq!(state.node_at(99), None);
    }
}
