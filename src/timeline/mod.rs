//! Timeline reconstruction for branching export graphs
//!
//! An export stores every edit and regeneration as a branch of a node graph.
//! The archived record keeps one linear path through it:
//!
//! 1. [`walk_from_leaf`]: follow parent links back from the conversation's
//!    current leaf, then reverse to root-to-leaf order.
//! 2. [`order_by_timestamp`]: when there is no usable leaf, order every node by
//!    its message creation time.
//!
//! [`reconstruct`] picks between the two. Both strategies are pure and never
//! recurse, so deep or cyclic parent chains cannot blow the stack or loop.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{ExportConversation, ExportNode};

/// One node on the reconstructed path, with the mapping key it was stored under
#[derive(Debug, Clone, Copy)]
pub struct TimelineNode<'a> {
    pub key: &'a str,
    pub node: &'a ExportNode,
}

impl<'a> TimelineNode<'a> {
    /// The node's own id, or the mapping key when the export left it empty
    pub fn id(&self) -> &'a str {
        if self.node.id.is_empty() { self.key } else { &self.node.id }
    }
}

/// Reconstruct the chronological node sequence of a conversation.
///
/// Uses the current-leaf walk when it yields a path, otherwise falls back to
/// timestamp ordering over the whole mapping.
pub fn reconstruct(conversation: &ExportConversation) -> Vec<TimelineNode<'_>> {
    if let Some(leaf) = conversation.current_leaf() {
        let path = walk_from_leaf(conversation, leaf);
        if !path.is_empty() {
            return path;
        }
        tracing::warn!(
            conversation = %conversation_label(conversation),
            current_node = leaf,
            "Current node not found in mapping, ordering by timestamp"
        );
    }

    order_by_timestamp(conversation)
}

/// Walk parent links from `leaf` back to the root and return the path root-first.
///
/// Stops at a node without a parent, at a parent missing from the mapping, or
/// as soon as a node id repeats. The walk never visits more nodes than the
/// mapping holds.
pub fn walk_from_leaf<'a>(
    conversation: &'a ExportConversation,
    leaf: &str,
) -> Vec<TimelineNode<'a>> {
    let mapping = &conversation.mapping;
    let mut path = Vec::with_capacity(mapping.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(mapping.len());

    let mut next = mapping.get_key_value(leaf);
    while let Some((key, node)) = next {
        if !visited.insert(key.as_str()) {
            tracing::debug!(
                conversation = %conversation_label(conversation),
                node = key.as_str(),
                "Parent chain cycles back, stopping walk"
            );
            break;
        }
        path.push(TimelineNode { key, node });

        next = node.parent_id().and_then(|parent| mapping.get_key_value(parent));
    }

    path.reverse();
    path
}

/// Order every node in the mapping by message creation time.
///
/// Nodes without a usable timestamp come first, followed by timestamped nodes
/// in ascending order. Ties break on node id and then mapping key, so the
/// result is a total order independent of map iteration.
pub fn order_by_timestamp(conversation: &ExportConversation) -> Vec<TimelineNode<'_>> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, TimelineNode<'_>)> = conversation
        .mapping
        .iter()
        .map(|(key, node)| (node.message_created_at(), TimelineNode { key, node }))
        .collect();

    keyed.sort_by(|(ts_a, a), (ts_b, b)| {
        compare_timestamps(ts_a, ts_b)
            .then_with(|| a.id().cmp(b.id()))
            .then_with(|| a.key.cmp(b.key))
    });

    keyed.into_iter().map(|(_, node)| node).collect()
}

fn compare_timestamps(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn conversation_label(conversation: &ExportConversation) -> &str {
    if conversation.conversation_id.is_empty() {
        &conversation.id
    } else {
        &conversation.conversation_id
    }
}
