//! Contract for the rendering layer.
//!
//! The picker never walks the visual tree itself. Finding the nearest
//! ancestor element that is owned by a document node or mark is a capability
//! the rendering layer provides, implementable by any technology that tags
//! rendered elements with back-references into the document.

use serde::Serialize;

use crate::host::DocNode;

/// Viewport-relative rectangle used for picker highlights.
///
/// All-zero means nothing is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        top: 0.0,
        left: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Rect::ZERO
    }

    /// Shift vertically, e.g. to convert a viewport-relative rectangle into
    /// page coordinates by adding the scroll offset.
    pub(crate) fn offset_y(mut self, dy: f64) -> Self {
        self.top += dy;
        self
    }
}

/// What a visual element resolved to: the owning element itself plus the
/// document node or mark it is bound to.
#[derive(Debug, Clone)]
pub struct Owned<E, N> {
    /// The nearest ancestor element (possibly the queried element itself)
    /// that carries a document back-reference. Highlight rectangles are
    /// computed against this element, not the original hover target.
    pub element: E,
    pub kind: OwnerKind<N>,
}

/// The document-side half of an ownership binding.
#[derive(Debug, Clone)]
pub enum OwnerKind<N> {
    Node {
        node: N,
        /// Document position at which the node starts.
        pos_at_start: usize,
    },
    /// Marks have no stable start position; they can be highlighted but not
    /// resolved to a path.
    Mark,
}

/// The rendering layer, as far as the inspector is concerned.
pub trait ViewLayer {
    /// Handle to an on-screen element.
    type Element;
    /// The host's live node type.
    type Node: DocNode;

    /// Walk the owning chain upward from `element` (including itself) and
    /// return the first binding to a document node or mark, if any.
    fn owner_of(&self, element: &Self::Element) -> Option<Owned<Self::Element, Self::Node>>;

    /// Viewport-relative bounding rectangle of an element.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Current vertical scroll offset of the editor surface.
    fn scroll_top(&self) -> f64;
}
