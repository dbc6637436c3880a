use tracing::debug;

use super::{frequency::FrequencyTable, min_heap::MinPriorityQueue};
use crate::{
    error::{CodecError, Result},
    symbol::Symbol,
};

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> usize {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Coding tree stored in an arena. Children are referenced by index; a node
/// has either zero or two children.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_text(text))
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let mut builder = TreeBuilder::default();
        let mut queue = MinPriorityQueue::with_capacity(crate::symbol::ALPHABET_SIZE);
        for (symbol, weight) in frequencies.iter() {
            queue.insert(weight, builder.leaf(symbol, weight));
        }

        // First extracted becomes the left child. A lone entry is the root.
        let root = loop {
            let (wx, x) = queue.extract_min().ok_or(CodecError::EmptyInput)?;
            match queue.extract_min() {
                None => break x,
                Some((wy, y)) => {
                    queue.insert(wx.saturating_add(wy), builder.internal(x, y))
                }
            }
        };

        let tree = builder.finish(root);
        debug!(
            "Built tree: {} leaves, {} nodes, weight {}",
            tree.leaf_count(),
            tree.nodes.len(),
            tree.node(root).weight()
        );
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Descends from `id`: `false` goes left, `true` goes right. `None` when
    /// `id` is a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Leaf symbols in left-to-right order.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => symbols.push(symbol),
                Node::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        symbols
    }

    pub fn depth(&self) -> usize {
        self.depth_from(self.root)
    }

    fn depth_from(&self, id: NodeId) -> usize {
        match self.nodes[id] {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => {
                1 + self.depth_from(left).max(self.depth_from(right))
            }
        }
    }

    fn same_shape(&self, a: NodeId, other: &Self, b: NodeId) -> bool {
        match (self.nodes[a], other.nodes[b]) {
            (Node::Leaf { symbol: x, .. }, Node::Leaf { symbol: y, .. }) => x == y,
            (
                Node::Internal {
                    left: l1,
                    right: r1,
                    ..
                },
                Node::Internal {
                    left: l2,
                    right: r2,
                    ..
                },
            ) => self.same_shape(l1, other, l2) && self.same_shape(r1, other, r2),
            _ => false,
        }
    }
}

/// Trees compare by shape and leaf symbols. Weights are not part of the tree
/// description, so a deserialized tree equals the one that was written.
impl PartialEq for HuffmanTree {
    fn eq(&self, other: &Self) -> bool {
        self.same_shape(self.root, other, other.root)
    }
}

impl Eq for HuffmanTree {}

/// Arena under construction. Shared by frequency-driven building and
/// deserialization.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn leaf(&mut self, symbol: Symbol, weight: usize) -> NodeId {
        self.push(Node::Leaf { symbol, weight })
    }

    pub fn internal(&mut self, left: NodeId, right: NodeId) -> NodeId {
        // Weights only order the queue, so they saturate instead of wrapping.
        let weight = self.nodes[left]
            .weight()
            .saturating_add(self.nodes[right].weight());
        self.push(Node::Internal {
            weight,
            left,
            right,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn finish(self, root: NodeId) -> HuffmanTree {
        HuffmanTree {
            nodes: self.nodes,
            root,
        }
    }
}
