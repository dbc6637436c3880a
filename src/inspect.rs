use crate::huffman::{CodeTable, HuffmanTree, Node, NodeId};
use crate::huffman::tree_codec::{ABSENT_TOKEN, INTERNAL_TOKEN};

/// Renders trees and code tables line by line through `log`.
pub struct TreePrinter<F> {
    log: F,
}

impl<F> TreePrinter<F> {
    pub fn new(log: F) -> Self {
        Self { log }
    }
}

macro_rules! log {
    ($log:expr, $($arg:tt)*) => {
        ($log)(format!($($arg)*));
    };
}

impl<F: Fn(String)> TreePrinter<F> {
    pub fn print_tree(&self, tree: &HuffmanTree) {
        log!(
            self.log,
            "Tree: {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        self.print_node(tree, tree.root(), 0);
    }

    fn print_node(&self, tree: &HuffmanTree, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match *tree.node(id) {
            Node::Leaf { symbol, .. } => {
                log!(self.log, "{indent}{symbol}");
                log!(self.log, "{indent}  {ABSENT_TOKEN}");
                log!(self.log, "{indent}  {ABSENT_TOKEN}");
            }
            Node::Internal { left, right, .. } => {
                log!(self.log, "{indent}{INTERNAL_TOKEN}");
                self.print_node(tree, left, depth + 1);
                self.print_node(tree, right, depth + 1);
            }
        }
    }

    pub fn print_codes(&self, table: &CodeTable) {
        log!(self.log, "Codes: {} symbols", table.len());
        for (symbol, code) in table.iter() {
            log!(self.log, "\t{symbol}\t{code}");
        }
    }
}
