use std::str::FromStr;

use crate::{
    bit_stream::unpack,
    error::{CodecError, Result},
};

const MAGIC: [u8; 2] = [0xBE, 0xEF];
const HEADER_LEN: usize = MAGIC.len() + 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadFormat {
    /// Magic bytes and a big-endian `u32` count of meaningful bits, then the
    /// packed bits.
    #[default]
    Framed,
    /// Packed bits only. Decoding consumes the final byte's padding too.
    Raw,
}

impl FromStr for PayloadFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "framed" => Ok(Self::Framed),
            "raw" => Ok(Self::Raw),
            _ => Err(format!("unknown payload format `{value}`")),
        }
    }
}

impl PayloadFormat {
    pub fn wrap(self, packed: Vec<u8>, bit_len: usize) -> Result<Vec<u8>> {
        match self {
            PayloadFormat::Raw => Ok(packed),
            PayloadFormat::Framed => {
                let bit_len = u32::try_from(bit_len).map_err(|_| {
                    CodecError::MalformedPayload(format!("{bit_len} bits do not fit the header"))
                })?;

                let mut output = Vec::with_capacity(HEADER_LEN + packed.len());
                output.extend(MAGIC);
                output.extend(bit_len.to_be_bytes());
                output.extend(packed);
                Ok(output)
            }
        }
    }

    /// Unpacks `payload` into the bits the decoder should walk.
    pub fn unwrap_bits(self, payload: &[u8]) -> Result<Vec<bool>> {
        match self {
            PayloadFormat::Raw => unpack(payload),
            PayloadFormat::Framed => {
                if payload.len() < HEADER_LEN || payload[..2] != MAGIC {
                    return Err(malformed("missing payload header"));
                }

                let mut count = [0u8; 4];
                count.copy_from_slice(&payload[2..HEADER_LEN]);
                let bit_len = u32::from_be_bytes(count);

                let body = &payload[HEADER_LEN..];
                if bit_len.div_ceil(8) as usize != body.len() {
                    return Err(malformed(format!(
                        "header declares {bit_len} bits but body holds {} bytes",
                        body.len()
                    )));
                }

                let mut bits = unpack(body)?;
                bits.truncate(bit_len as usize);
                Ok(bits)
            }
        }
    }
}

fn malformed<S: Into<String>>(reason: S) -> CodecError {
    CodecError::MalformedPayload(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framed_layout() {
        let payload = PayloadFormat::Framed.wrap(vec![0xB6, 0xC0], 12).unwrap();
        assert_eq!(payload, vec![0xBE, 0xEF, 0, 0, 0, 12, 0xB6, 0xC0]);

        let bits = PayloadFormat::Framed.unwrap_bits(&payload).unwrap();
        assert_eq!(bits.len(), 12);
    }

    #[test]
    fn test_raw_layout() {
        let payload = PayloadFormat::Raw.wrap(vec![0xB6, 0xC0], 12).unwrap();
        assert_eq!(payload, vec![0xB6, 0xC0]);
        assert_eq!(PayloadFormat::Raw.unwrap_bits(&payload).unwrap().len(), 16);
    }

    #[test]
    fn test_empty_framed() {
        let payload = PayloadFormat::Framed.wrap(Vec::new(), 0).unwrap();
        assert_eq!(payload.len(), HEADER_LEN);
        assert!(PayloadFormat::Framed.unwrap_bits(&payload).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_framing() {
        let cases: [&[u8]; 5] = [
            &[],
            &[0xBE, 0xEF, 0, 0],
            &[0xDE, 0xAD, 0, 0, 0, 12, 0xB6, 0xC0],
            &[0xBE, 0xEF, 0, 0, 0, 17, 0xB6, 0xC0],
            &[0xBE, 0xEF, 0xFF, 0xFF, 0xFF, 0xFF, 0xB6, 0xC0],
        ];
        for payload in cases {
            assert!(matches!(
                PayloadFormat::Framed.unwrap_bits(payload),
                Err(CodecError::MalformedPayload(_))
            ));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("raw".parse::<PayloadFormat>(), Ok(PayloadFormat::Raw));
        assert_eq!("framed".parse::<PayloadFormat>(), Ok(PayloadFormat::Framed));
        assert!("zip".parse::<PayloadFormat>().is_err());
    }
}
