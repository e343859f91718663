//! The append-only, index-addressed AST store.
//!
//! An [`Arena`] never produces heap-linked tree objects: every node is a
//! fixed-size [`NodeRecord`] living in one contiguous `Vec`, and parent/child
//! relationships are recovered from span containment rather than stored as
//! pointers: allocation order is post-order traversal, so an offset-range
//! check over the preceding records recovers containment.

use text_size::{TextRange, TextSize};

use crate::attrib::Attribute;
use crate::kind::NodeKind;

/// A stable index into an [`Arena`]. Valid for the arena's entire lifetime;
/// arenas never delete nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The fixed-size record: `(kind, start_offset, end_offset,
/// attribute_index)`. `attribute_index` is `-1` when the node carries no
/// side payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    pub kind: NodeKind,
    pub start: u32,
    pub end: u32,
    pub attribute_index: i32,
}

impl NodeRecord {
    #[inline]
    pub fn has_attribute(&self) -> bool {
        self.attribute_index >= 0
    }
}

/// A snapshot of an arena's length, used to roll back speculative
/// allocations made during backtracked parsing attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark {
    node_len: u32,
    attr_len: u32,
}

/// A read-only view of a node plus a borrowed reference to the arena that
/// owns it, for ergonomic attribute access without re-threading an `&Arena`
/// through every call site.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    arena: &'a Arena,
    id: NodeId,
}

impl<'a> NodeView<'a> {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.arena.get(self.id).kind
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.arena.get(self.id).start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.arena.get(self.id).end
    }

    /// `(start, end)` as a [`TextRange`], for callers at the API boundary
    /// that want `text_size`'s type rather than the raw `u32` pair the
    /// arena stores internally.
    #[inline]
    pub fn range(&self) -> TextRange {
        let record = self.arena.get(self.id);
        TextRange::new(TextSize::from(record.start), TextSize::from(record.end))
    }

    #[inline]
    pub fn attribute(&self) -> Option<&'a Attribute> {
        self.arena.attribute(self.id)
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.arena.children(self.id)
    }
}

/// The append-only node store. Populated monotonically by exactly one
/// parser, then frozen for readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arena {
    nodes: Vec<NodeRecord>,
    attributes: Vec<Attribute>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node with no side payload.
    pub fn allocate(&mut self, kind: NodeKind, start: u32, end: u32) -> NodeId {
        debug_assert!(start <= end, "node span must be non-decreasing");
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            start,
            end,
            attribute_index: -1,
        });
        id
    }

    /// Allocate a node carrying an attribute payload.
    pub fn allocate_with_attribute(
        &mut self,
        kind: NodeKind,
        start: u32,
        end: u32,
        attribute: Attribute,
    ) -> NodeId {
        debug_assert!(start <= end, "node span must be non-decreasing");
        let attribute_index = self.attributes.len() as i32;
        self.attributes.push(attribute);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeRecord {
            kind,
            start,
            end,
            attribute_index,
        });
        id
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.nodes.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> NodeRecord {
        self.nodes[id.index()]
    }

    #[inline]
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView { arena: self, id }
    }

    pub fn attribute(&self, id: NodeId) -> Option<&Attribute> {
        let record = self.get(id);
        if record.attribute_index < 0 {
            None
        } else {
            Some(&self.attributes[record.attribute_index as usize])
        }
    }

    /// The root node, by convention the last-allocated node
    /// (`compilation_unit`).
    pub fn root(&self) -> NodeId {
        assert!(!self.nodes.is_empty(), "empty arena has no root");
        NodeId(self.nodes.len() as u32 - 1)
    }

    pub fn watermark(&self) -> Watermark {
        Watermark {
            node_len: self.nodes.len() as u32,
            attr_len: self.attributes.len() as u32,
        }
    }

    /// Discard every node and attribute allocated since `mark`. Used to roll
    /// back a failed speculative sub-parse.
    pub fn truncate_to(&mut self, mark: Watermark) {
        self.nodes.truncate(mark.node_len as usize);
        self.attributes.truncate(mark.attr_len as usize);
    }

    /// Every node whose span is contained in `[start, end)`, in allocation
    /// (post-order) order.
    pub fn nodes_in_span(&self, start: u32, end: u32) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(move |(i, n)| {
            if n.start >= start && n.end <= end {
                Some(NodeId(i as u32))
            } else {
                None
            }
        })
    }

    /// Every comment token recorded in the tree, in source-offset order,
    /// regardless of which declaration or block they ended up attached
    /// under. A caller that doesn't want to depend on the
    /// attach-to-nearest-block heuristic can always recover every comment
    /// this way.
    pub fn trivia(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::LineComment | NodeKind::BlockComment))
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }

    /// The direct children of `id`, left to right, recovered from span
    /// containment over the post-order allocation stream.
    ///
    /// `O(subtree size)`; intended for debugging, tests, and infrequent
    /// consumer queries rather than the parser's hot path.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let parent = self.get(id);
        let mut result = Vec::new();
        let mut cursor = id.0;

        while cursor > 0 {
            let candidate_idx = cursor - 1;
            let candidate = self.nodes[candidate_idx as usize];
            if candidate.start < parent.start || candidate.end > parent.end {
                break;
            }
            result.push(NodeId(candidate_idx));
            cursor = self.subtree_start(NodeId(candidate_idx));
        }

        result.reverse();
        result
    }

    /// The first index belonging to `id`'s own subtree (i.e. `id` included),
    /// found by walking backward while predecessors remain nested inside
    /// `id`'s span.
    fn subtree_start(&self, id: NodeId) -> u32 {
        let node = self.get(id);
        let mut j = id.0;
        while j > 0 {
            let candidate = self.nodes[(j - 1) as usize];
            if candidate.start >= node.start && candidate.end <= node.end {
                j -= 1;
            } else {
                break;
            }
        }
        j
    }

    /// Value equality over the full node sequence and all attribute
    /// payloads. Arenas are also directly comparable via `==`; this method
    /// exists as the named, documented entry point for callers who want to
    /// assert it explicitly.
    pub fn equals(&self, other: &Arena) -> bool {
        self == other
    }
}
