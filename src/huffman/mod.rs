mod code_table;
mod decoder;
mod frequency;
mod min_heap;
mod tree;
pub mod tree_codec;

pub use code_table::{Code, CodeTable};
pub use decoder::decode;
pub use frequency::FrequencyTable;
pub use min_heap::MinPriorityQueue;
pub use tree::{HuffmanTree, Node, NodeId};
