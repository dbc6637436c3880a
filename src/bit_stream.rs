use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::Result;

/// Packs bits MSB-first. The final byte is zero-padded on its low-order end.
pub struct BitPacker {
    writer: BitWriter<Vec<u8>, BigEndian>,
    bit_len: usize,
}

impl BitPacker {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(bits: usize) -> Self {
        let bytes = Vec::with_capacity(bits.div_ceil(8));
        Self {
            writer: BitWriter::endian(bytes, BigEndian),
            bit_len: 0,
        }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn push_bits(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.writer.write_bit(bit)?;
        }
        self.bit_len += bits.len();
        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.writer.byte_align()?;
        Ok(self.writer.into_writer())
    }
}

impl Default for BitPacker {
    fn default() -> Self {
        Self::new()
    }
}

pub fn pack(bits: &[bool]) -> Result<Vec<u8>> {
    let mut packer = BitPacker::with_capacity(bits.len());
    packer.push_bits(bits)?;
    packer.finish()
}

/// Every bit of `bytes`, MSB-first, padding included.
pub fn unpack(bytes: &[u8]) -> Result<Vec<bool>> {
    let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for _ in 0..bytes.len() * 8 {
        bits.push(reader.read_bit()?);
    }
    Ok(bits)
}
