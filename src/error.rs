use thiserror::Error;

use crate::symbol::Symbol;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("input contains no encodable symbols")]
    EmptyInput,

    #[error("no code assigned to symbol {0}")]
    Lookup(Symbol),

    #[error("malformed tree description: {0}")]
    MalformedTree(String),

    #[error("bitstream walks off the tree at bit {position}")]
    Traversal { position: usize },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
