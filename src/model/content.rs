//! Narrative documentation content attached to resolved symbol nodes.
//!
//! The narrative-comment pipeline parses documentation comments into a generic content
//! tree - elements with attributes and text, preserved verbatim. The graph consumes
//! that tree as-is: it never interprets markup, it only attaches content to the node a
//! reference resolved to. Downstream rendering walks the tree when emitting pages.
//!
//! # Key Types
//! - [`ContentNode`] - One node of the content tree (element or text)
//! - [`DocContent`] - The content attached to one symbol (a sequence of nodes)
//! - [`ContentSlot`] - The write-overwrite cell each graph node carries
//!
//! # Attachment Semantics
//!
//! A node's identity is immutable once constructed; its narrative content is the only
//! late-written state. Attaching content to a node that already has content replaces
//! the previous tree wholesale - trees are never merged.

use std::sync::{Arc, RwLock};

/// One node of a narrative content tree.
///
/// The tree mirrors the XML shape of documentation comments without interpreting it:
/// `<summary>`, `<param>`, `<see cref="..."/>` and any custom elements all become
/// [`ContentNode::Element`] values with their attributes preserved in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// A run of character data.
    Text(String),
    /// An element with attributes and child nodes.
    Element {
        /// Element name, e.g. `summary` or `see`.
        name: String,
        /// Attributes in document order.
        attributes: Vec<(String, String)>,
        /// Child nodes in document order.
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// Create an element node without attributes.
    #[must_use]
    pub fn element(name: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element {
            name: name.into(),
            attributes: Vec::new(),
            children,
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(text.into())
    }

    /// The element name, if this is an element node.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            ContentNode::Element { name, .. } => Some(name),
            ContentNode::Text(_) => None,
        }
    }

    /// Concatenate all text beneath this node, in document order.
    #[must_use]
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(text) => out.push_str(text),
            ContentNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// The narrative content attached to one symbol: the child nodes of its
/// `<member>` element, preserved in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocContent {
    /// Top-level content nodes.
    nodes: Vec<ContentNode>,
}

impl DocContent {
    /// Create content from a sequence of top-level nodes.
    #[must_use]
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        DocContent { nodes }
    }

    /// The top-level nodes in document order.
    #[must_use]
    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Whether this content carries no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All top-level elements with the given name, in document order.
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ContentNode> {
        self.nodes
            .iter()
            .filter(move |node| node.name() == Some(name))
    }

    /// The first top-level element with the given name, if any.
    ///
    /// Convenience for the one-per-member elements (`summary`, `remarks`, `value`).
    /// The returned borrow is tied to the content alone, so callers can look up
    /// with a short-lived name and keep the node.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&ContentNode> {
        self.nodes.iter().find(|node| node.name() == Some(name))
    }
}

/// The write-overwrite content cell each graph node carries.
///
/// Empty until the resolver attaches content. Attaching again replaces the previous
/// tree - never merges. Reads hand out a cheap [`Arc`] clone so rendering tasks can
/// hold content without blocking writers.
#[derive(Debug, Default)]
pub struct ContentSlot {
    content: RwLock<Option<Arc<DocContent>>>,
}

impl ContentSlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        ContentSlot::default()
    }

    /// Attach content, replacing whatever the slot held before.
    pub fn attach(&self, content: DocContent) {
        let mut guard = self
            .content
            .write()
            .expect("Failed to acquire content write lock");
        *guard = Some(Arc::new(content));
    }

    /// The attached content, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<DocContent>> {
        self.content
            .read()
            .expect("Failed to acquire content read lock")
            .clone()
    }

    /// Whether content has been attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.content
            .read()
            .expect("Failed to acquire content read lock")
            .is_some()
    }
}
