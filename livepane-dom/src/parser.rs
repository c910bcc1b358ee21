//! HTML5 parsing of incoming markup into a patch target.

use crate::error::{DomError, DomResult};
use crate::tree::Node;
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use std::collections::BTreeMap;

/// Parses a markup string and returns its `<body>` as a [`Node`].
///
/// The preview patches against the document body, so the input may be a
/// full document or a bare fragment — the HTML5 parser synthesizes the
/// surrounding `html`/`body` scaffolding either way. Doctype, comments and
/// processing instructions are dropped; whitespace-only text is skipped.
pub fn parse_body(html: &str) -> DomResult<Node> {
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let body = find_body(&dom.document).ok_or(DomError::MissingBody)?;
    convert_node(&body).ok_or(DomError::MissingBody)
}

/// Walks document → html → body in the parsed tree.
fn find_body(document: &Handle) -> Option<Handle> {
    let html = document
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child) == Some("html"))
        .cloned()?;
    html.children
        .borrow()
        .iter()
        .find(|child| element_name(child) == Some("body"))
        .cloned()
}

fn element_name(node: &Handle) -> Option<&str> {
    match &node.data {
        RcNodeData::Element { name, .. } => Some(&name.local),
        _ => None,
    }
}

/// Converts an rcdom node into our representation.
/// Returns `None` for node kinds the live tree does not model.
fn convert_node(rc_node: &Handle) -> Option<Node> {
    match &rc_node.data {
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            // Skip whitespace-only text nodes
            if text.trim().is_empty() {
                return None;
            }
            Some(Node::Text(text))
        }

        RcNodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string();

            let attrs: BTreeMap<String, String> = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();

            let children = rc_node
                .children
                .borrow()
                .iter()
                .filter_map(convert_node)
                .collect();

            Some(Node::Element {
                tag,
                attrs,
                children,
            })
        }

        // Doctype, comments and processing instructions carry no live state
        RcNodeData::Document
        | RcNodeData::Doctype { .. }
        | RcNodeData::Comment { .. }
        | RcNodeData::ProcessingInstruction { .. } => None,
    }
}
