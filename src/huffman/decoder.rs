use tracing::trace;

use super::tree::{HuffmanTree, Node};
use crate::error::{CodecError, Result};

/// Walks `tree` once per bit, emitting a symbol at every leaf and restarting
/// from the root. Bits left over mid-path at the end are dropped.
pub fn decode(tree: &HuffmanTree, bits: &[bool]) -> Result<String> {
    let root = tree.root();
    let mut output = String::with_capacity(bits.len() / 2);

    // A leaf root has the one-bit code `0` and no right child.
    if let Node::Leaf { symbol, .. } = *tree.node(root) {
        for (position, &bit) in bits.iter().enumerate() {
            if bit {
                return Err(CodecError::Traversal { position });
            }
            output.push(symbol.as_char());
        }
        return Ok(output);
    }

    let mut current = root;
    let mut path_len = 0;
    for (position, &bit) in bits.iter().enumerate() {
        current = tree
            .child(current, bit)
            .ok_or(CodecError::Traversal { position })?;
        path_len += 1;

        if let Node::Leaf { symbol, .. } = *tree.node(current) {
            output.push(symbol.as_char());
            current = root;
            path_len = 0;
        }
    }

    if current != root {
        trace!("Dropped {path_len} trailing bits that end mid-path");
    }

    Ok(output)
}
