use std::{collections::BTreeMap, fmt};

use super::tree::{HuffmanTree, Node, NodeId};
use crate::{
    error::{CodecError, Result},
    symbol::{symbols, Symbol},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match *tree.node(tree.root()) {
            // No descent happens from a leaf root, so give it a one-bit code.
            Node::Leaf { symbol, .. } => {
                codes.insert(symbol, Code(vec![false]));
            }
            Node::Internal { .. } => {
                let mut code = Vec::new();
                Self::assign(tree, tree.root(), &mut code, &mut codes);
            }
        }
        Self { codes }
    }

    fn assign(
        tree: &HuffmanTree,
        id: NodeId,
        code: &mut Vec<bool>,
        codes: &mut BTreeMap<Symbol, Code>,
    ) {
        match *tree.node(id) {
            Node::Leaf { symbol, .. } => {
                codes.insert(symbol, Code(code.clone()));
            }
            Node::Internal { left, right, .. } => {
                code.push(false);
                Self::assign(tree, left, code, codes);
                code.pop();

                code.push(true);
                Self::assign(tree, right, code, codes);
                code.pop();
            }
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Concatenates the codes of every symbol in `text`. Characters outside
    /// the alphabet are skipped.
    pub fn encode(&self, text: &str) -> Result<Vec<bool>> {
        let mut bits = Vec::with_capacity(text.len() * 4);
        for symbol in symbols(text) {
            let code = self.get(symbol).ok_or(CodecError::Lookup(symbol))?;
            bits.extend_from_slice(code.bits());
        }
        Ok(bits)
    }
}
