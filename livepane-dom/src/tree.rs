//! Parsed target nodes and identity-carrying live nodes.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Elements whose HTML form has no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// An immutable node parsed out of incoming markup — the patch target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    /// Creates an element node.
    pub fn element(
        tag: impl Into<String>,
        attrs: impl IntoIterator<Item = (String, String)>,
        children: Vec<Node>,
    ) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs: attrs.into_iter().collect(),
            children,
        }
    }

    /// Creates a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// The element tag, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }

    /// An attribute value, if this is an element carrying it.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            Self::Text(_) => None,
        }
    }
}

/// Node content of a live tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveKind {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        children: Vec<LiveNode>,
    },
    Text(String),
}

/// A node of the live tree.
///
/// The `serial` is assigned once when the node enters the tree and survives
/// every reconcile that keeps the node, standing in for the per-node state
/// (focus, scroll, loaded resources) a real document would carry. A changed
/// serial after a patch means the node was torn down and rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveNode {
    pub(crate) serial: u64,
    pub(crate) kind: LiveKind,
}

impl LiveNode {
    /// The identity serial of this node.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// The element tag, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            LiveKind::Element { tag, .. } => Some(tag),
            LiveKind::Text(_) => None,
        }
    }

    /// An attribute value, if this is an element carrying it.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            LiveKind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            LiveKind::Text(_) => None,
        }
    }

    /// Text content, if this is a text node.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            LiveKind::Text(content) => Some(content),
            LiveKind::Element { .. } => None,
        }
    }

    /// Child nodes (empty for text nodes).
    pub fn children(&self) -> &[LiveNode] {
        match &self.kind {
            LiveKind::Element { children, .. } => children,
            LiveKind::Text(_) => &[],
        }
    }

    /// Depth-first search for the first element with the given tag.
    pub fn find(&self, tag: &str) -> Option<&LiveNode> {
        if self.tag() == Some(tag) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(tag))
    }

    /// Serializes the subtree back to HTML. Used for diagnostics and tests;
    /// the live tree itself is the source of truth.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match &self.kind {
            LiveKind::Text(content) => out.push_str(&escape_text(content)),
            LiveKind::Element {
                tag,
                attrs,
                children,
            } => {
                let _ = write!(out, "<{tag}");
                for (name, value) in attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
