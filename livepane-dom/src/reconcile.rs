//! In-place reconcile of a live tree toward a parsed target.

use crate::tree::{LiveKind, LiveNode, Node};
use tracing::trace;

/// The diff engine: patches live trees in place.
///
/// Matching is positional with two escape hatches taken from the usual
/// DOM-morphing behavior: a tag mismatch replaces the subtree, and two
/// elements whose `id` attributes disagree are never treated as the same
/// node even when their tags match. Everything that matches keeps its
/// serial — and with it, its modeled live state.
#[derive(Debug, Default)]
pub struct DiffEngine {
    next_serial: u64,
}

impl DiffEngine {
    /// Creates a diff engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh live subtree from a target, assigning new serials.
    pub fn materialize(&mut self, target: &Node) -> LiveNode {
        let serial = self.allocate();
        let kind = match target {
            Node::Text(content) => LiveKind::Text(content.clone()),
            Node::Element {
                tag,
                attrs,
                children,
            } => LiveKind::Element {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: children.iter().map(|child| self.materialize(child)).collect(),
            },
        };
        LiveNode { serial, kind }
    }

    /// Patches `live` in place to match `target`.
    ///
    /// Idempotent: reconciling the same target twice leaves the tree
    /// (serials included) identical after the second application.
    pub fn reconcile(&mut self, live: &mut LiveNode, target: &Node) {
        match (&mut live.kind, target) {
            (LiveKind::Text(content), Node::Text(new_content)) => {
                if content != new_content {
                    content.clone_from(new_content);
                }
            }

            (
                LiveKind::Element {
                    tag,
                    attrs,
                    children,
                },
                Node::Element {
                    tag: new_tag,
                    attrs: new_attrs,
                    children: new_children,
                },
            ) if tag == new_tag && attrs.get("id") == new_attrs.get("id") => {
                if attrs != new_attrs {
                    attrs.clone_from(new_attrs);
                }
                self.reconcile_children(children, new_children);
            }

            // Kind, tag or id mismatch: tear down and rebuild
            _ => {
                trace!(old_serial = live.serial, "replacing live subtree");
                *live = self.materialize(target);
            }
        }
    }

    /// Pairs children positionally; surplus live children are removed,
    /// surplus target children appended.
    fn reconcile_children(&mut self, live: &mut Vec<LiveNode>, target: &[Node]) {
        let common = live.len().min(target.len());
        for (live_child, target_child) in live.iter_mut().zip(target.iter()).take(common) {
            self.reconcile(live_child, target_child);
        }
        live.truncate(target.len());
        for target_child in &target[common..] {
            live.push(self.materialize(target_child));
        }
    }

    fn allocate(&mut self) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }
}
