/// Bit buffer and data codeword assembly
use crate::encoder::tables::{BYTE_MODE_INDICATOR, PAD_CODEWORDS, byte_capacity, ec_block_info};
use crate::error::{Error, Result};
use crate::models::{ECLevel, Version};

/// Growable sequence of bits, packed MSB first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no bit has been written
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit
    pub fn put_bit(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Append the low `length` bits of `value`, most significant first
    pub fn put(&mut self, value: u32, length: usize) {
        debug_assert!(length <= 32);
        for i in (0..length).rev() {
            self.put_bit((value >> i) & 1 == 1);
        }
    }

    /// Pad with zero bits up to the next byte boundary
    pub fn pad_to_byte(&mut self) {
        while self.len % 8 != 0 {
            self.put_bit(false);
        }
    }

    /// Packed bytes; a trailing partial byte is zero-filled
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer into its packed bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Build the data codewords of a byte-mode segment for `data`
///
/// Layout: mode indicator, character count, payload bytes, terminator,
/// zero bits to a byte boundary, then alternating pad codewords.
pub fn encode_data_codewords(data: &[u8], version: Version, ec_level: ECLevel) -> Result<Vec<u8>> {
    let capacity = byte_capacity(version, ec_level);
    if data.len() > capacity {
        return Err(Error::CapacityExceeded {
            len: data.len(),
            capacity,
        });
    }

    let data_codewords = ec_block_info(version, ec_level).data_codewords;
    let capacity_bits = data_codewords * 8;

    let mut buffer = BitBuffer::new();
    buffer.put(BYTE_MODE_INDICATOR, 4);
    buffer.put(data.len() as u32, version.char_count_bits());
    for &byte in data {
        buffer.put(byte as u32, 8);
    }

    let terminator = (capacity_bits - buffer.len()).min(4);
    buffer.put(0, terminator);
    buffer.pad_to_byte();

    let mut codewords = buffer.into_bytes();
    let missing = data_codewords - codewords.len();
    codewords.extend(PAD_CODEWORDS.iter().cycle().take(missing));
    Ok(codewords)
}
