//! Textual tree description.
//!
//! Preorder, whitespace-separated tokens: `#` for an absent child, the symbol
//! token for a leaf (`SPACE` and `NEWLINE` stand in for whitespace), and
//! [`INTERNAL_TOKEN`] for an internal node. Leaves are written with their two
//! absent children, so `"ab"` serializes as `* a # # b # #`.

use std::{collections::BTreeSet, str::SplitWhitespace};

use super::tree::{HuffmanTree, Node, NodeId, TreeBuilder};
use crate::{
    error::{CodecError, Result},
    symbol::{Symbol, ALPHABET_SIZE},
};

pub const ABSENT_TOKEN: &str = "#";

/// Placeholder written for internal nodes. Readers ignore its content.
pub const INTERNAL_TOKEN: &str = "*";

pub fn serialize(tree: &HuffmanTree) -> String {
    let mut tokens = Vec::new();
    write_node(tree, tree.root(), &mut tokens);
    tokens.join(" ")
}

fn write_node(tree: &HuffmanTree, id: NodeId, tokens: &mut Vec<String>) {
    match *tree.node(id) {
        Node::Leaf { symbol, .. } => {
            tokens.push(symbol.token());
            tokens.push(ABSENT_TOKEN.to_string());
            tokens.push(ABSENT_TOKEN.to_string());
        }
        Node::Internal { left, right, .. } => {
            tokens.push(INTERNAL_TOKEN.to_string());
            write_node(tree, left, tokens);
            write_node(tree, right, tokens);
        }
    }
}

pub fn deserialize(text: &str) -> Result<HuffmanTree> {
    let mut reader = TreeReader {
        tokens: text.split_whitespace(),
        builder: TreeBuilder::default(),
        seen: BTreeSet::new(),
    };

    let root = reader
        .read_node(0)?
        .ok_or_else(|| malformed("tree has no root"))?;

    if let Some(token) = reader.tokens.next() {
        return Err(malformed(format!("unexpected token `{token}` after tree")));
    }

    Ok(reader.builder.finish(root))
}

fn malformed<S: Into<String>>(reason: S) -> CodecError {
    CodecError::MalformedTree(reason.into())
}

struct TreeReader<'a> {
    tokens: SplitWhitespace<'a>,
    builder: TreeBuilder,
    seen: BTreeSet<Symbol>,
}

impl TreeReader<'_> {
    fn read_node(&mut self, depth: usize) -> Result<Option<NodeId>> {
        let token = self
            .tokens
            .next()
            .ok_or_else(|| malformed("unexpected end of tree description"))?;

        if token == ABSENT_TOKEN {
            return Ok(None);
        }

        // A tree over the alphabet never nests deeper than this.
        if depth >= ALPHABET_SIZE {
            return Err(malformed("tree nests deeper than the alphabet allows"));
        }

        let left = self.read_node(depth + 1)?;
        let right = self.read_node(depth + 1)?;

        match (left, right) {
            (None, None) => {
                let symbol = Symbol::from_token(token)
                    .ok_or_else(|| malformed(format!("`{token}` is not a symbol token")))?;
                if !self.seen.insert(symbol) {
                    return Err(malformed(format!("symbol {symbol} appears twice")));
                }
                Ok(Some(self.builder.leaf(symbol, 0)))
            }
            (Some(left), Some(right)) => Ok(Some(self.builder.internal(left, right))),
            _ => Err(malformed(format!("node `{token}` has exactly one child"))),
        }
    }
}
