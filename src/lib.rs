//! Huffman codec for plain text over a small alphabet: lowercase letters,
//! digits, `.`, `,`, space and newline.
//!
//! Compression produces two artifacts, a packed payload and a textual tree
//! description. Decompression needs both.
//!
//! ```
//! use huffman_text_codec::{compress, decompress, PayloadFormat};
//!
//! let compressed = compress("Ab ab\n", PayloadFormat::Framed)?;
//! let text = decompress(&compressed.tree, &compressed.payload, PayloadFormat::Framed)?;
//! assert_eq!(text, "ab ab\n");
//! # Ok::<(), huffman_text_codec::CodecError>(())
//! ```

use std::io::Write;

use tracing::debug;

pub mod bit_stream;
pub mod error;
pub mod huffman;
pub mod inspect;
pub mod payload;
pub mod symbol;

pub use error::{CodecError, Result};
pub use huffman::{CodeTable, FrequencyTable, HuffmanTree};
pub use payload::PayloadFormat;

#[derive(Debug, Clone, Copy, Default)]
pub struct CodecConfig {
    pub payload_format: PayloadFormat,
}

pub struct Compressed {
    pub payload: Vec<u8>,
    pub tree: String,
    /// Meaningful bits in the payload, padding and header excluded.
    pub bit_len: usize,
}

pub fn compress(text: &str, format: PayloadFormat) -> Result<Compressed> {
    let frequencies = FrequencyTable::from_text(text);
    debug!("Counted {} symbols", frequencies.total());

    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);
    let bits = codes.encode(text)?;
    let bit_len = bits.len();
    debug!("Encoded {bit_len} bits with {} codes", codes.len());

    let packed = bit_stream::pack(&bits)?;
    Ok(Compressed {
        payload: format.wrap(packed, bit_len)?,
        tree: huffman::tree_codec::serialize(&tree),
        bit_len,
    })
}

pub fn decompress(tree_text: &str, payload: &[u8], format: PayloadFormat) -> Result<String> {
    let tree = huffman::tree_codec::deserialize(tree_text)?;
    let bits = format.unwrap_bits(payload)?;
    debug!(
        "Decoding {} bits with a {}-leaf tree",
        bits.len(),
        tree.leaf_count()
    );
    huffman::decode(&tree, &bits)
}

/// Compresses `text` and writes both artifacts. Both are built in memory
/// before either sink is touched, so a compression error writes nothing.
///
/// The payload is written and flushed before the tree. If the tree sink then
/// fails, the payload sink already holds a complete payload with no matching
/// tree; callers writing to files should discard both.
pub fn compress_into<P: Write, T: Write>(
    text: &str,
    payload: &mut P,
    tree: &mut T,
    config: &CodecConfig,
) -> Result<Compressed> {
    let compressed = compress(text, config.payload_format)?;
    payload.write_all(&compressed.payload)?;
    payload.flush()?;
    tree.write_all(compressed.tree.as_bytes())?;
    tree.flush()?;
    Ok(compressed)
}

/// Decompresses into `output`. A failed decode writes nothing.
pub fn decompress_into<W: Write>(
    tree_text: &str,
    payload: &[u8],
    output: &mut W,
    config: &CodecConfig,
) -> Result<String> {
    let text = decompress(tree_text, payload, config.payload_format)?;
    output.write_all(text.as_bytes())?;
    output.flush()?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::filter_and_fold;

    fn round_trip(text: &str, format: PayloadFormat) -> String {
        let compressed = compress(text, format).unwrap();
        decompress(&compressed.tree, &compressed.payload, format).unwrap()
    }

    #[test]
    fn test_round_trip() {
        for text in [
            "ab ab\n",
            "a",
            "Hello, World. 2024\n",
            "the quick brown fox jumps over the lazy dog\n",
            "0123456789.,\n \n",
        ] {
            assert_eq!(round_trip(text, PayloadFormat::Framed), filter_and_fold(text));
        }
    }

    #[test]
    fn test_large_input() {
        let text = "lorem ipsum dolor sit amet, 42.\n".repeat(500);
        assert_eq!(round_trip(&text, PayloadFormat::Framed), text);
    }

    #[test]
    fn test_concrete_scenario() {
        let compressed = compress("ab ab\n", PayloadFormat::Framed).unwrap();
        assert_eq!(compressed.bit_len, 12);
        assert_eq!(&compressed.payload[6..], &[0xB6, 0xC0]);
        assert_eq!(compressed.tree, "* * NEWLINE # # SPACE # # * a # # b # #");
        assert_eq!(
            decompress(&compressed.tree, &compressed.payload, PayloadFormat::Framed).unwrap(),
            "ab ab\n"
        );
    }

    #[test]
    fn test_raw_keeps_padding_artifact() {
        let compressed = compress("ab ab\n", PayloadFormat::Raw).unwrap();
        assert_eq!(compressed.payload, vec![0xB6, 0xC0]);
        assert_eq!(round_trip("ab ab\n", PayloadFormat::Raw), "ab ab\n\n\n");
    }

    #[test]
    fn test_single_symbol() {
        assert_eq!(round_trip("aaaa", PayloadFormat::Framed), "aaaa");
        assert_eq!(round_trip("AAAAAAAA", PayloadFormat::Raw), "aaaaaaaa");
        // Raw payloads of a one-leaf tree decode padding as extra symbols.
        assert_eq!(round_trip("aaaa", PayloadFormat::Raw), "aaaaaaaa");
    }

    #[test]
    fn test_filtering() {
        assert_eq!(round_trip("a!b", PayloadFormat::Framed), "ab");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            compress("!!!", PayloadFormat::Framed),
            Err(CodecError::EmptyInput)
        ));
    }

    #[test]
    fn test_malformed_tree() {
        let compressed = compress("ab ab\n", PayloadFormat::Framed).unwrap();
        let truncated = "* * NEWLINE # # SPACE # # * a # # b #";
        assert!(matches!(
            decompress(truncated, &compressed.payload, PayloadFormat::Framed),
            Err(CodecError::MalformedTree(_))
        ));
    }

    #[test]
    fn test_mismatched_payload() {
        // A one-leaf tree cannot follow a `1` bit.
        let compressed = compress("ab ab\n", PayloadFormat::Framed).unwrap();
        assert!(matches!(
            decompress("a # #", &compressed.payload, PayloadFormat::Framed),
            Err(CodecError::Traversal { position: 0 })
        ));
    }

    #[test]
    fn test_into_sinks() {
        let config = CodecConfig::default();
        let (mut payload, mut tree, mut output) = (Vec::new(), Vec::new(), Vec::new());
        compress_into("Ab, ab.\n", &mut payload, &mut tree, &config).unwrap();

        let tree = String::from_utf8(tree).unwrap();
        decompress_into(&tree, &payload, &mut output, &config).unwrap();
        assert_eq!(output, b"ab, ab.\n");
    }

    #[test]
    fn test_failed_decode_writes_nothing() {
        let config = CodecConfig::default();
        let mut output = Vec::new();
        let payload = [0xBE, 0xEF, 0, 0, 0, 8, 0b0110_0000];
        let result = decompress_into("a # #", &payload, &mut output, &config);
        assert!(matches!(result, Err(CodecError::Traversal { position: 1 })));
        assert!(output.is_empty());
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_errors() {
        let config = CodecConfig::default();

        let mut tree = Vec::new();
        let result = compress_into("ab ab\n", &mut BrokenSink, &mut tree, &config);
        assert!(matches!(result, Err(CodecError::Io(_))));
        assert!(tree.is_empty());

        let mut payload = Vec::new();
        let result = compress_into("ab ab\n", &mut payload, &mut BrokenSink, &config);
        assert!(matches!(result, Err(CodecError::Io(_))));
        assert_eq!(payload.len(), 8);

        let compressed = compress("ab ab\n", config.payload_format).unwrap();
        let result = decompress_into(&compressed.tree, &compressed.payload, &mut BrokenSink, &config);
        assert!(matches!(result, Err(CodecError::Io(_))));
    }
}
