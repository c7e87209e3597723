use crate::models::{ECLevel, Version};

/// Block layout of one (version, level) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    /// Number of error correction blocks
    pub num_blocks: usize,
    /// ECC codewords in every block
    pub ecc_per_block: usize,
    /// Total codewords in the symbol (data + ECC)
    pub total_codewords: usize,
    /// Data codewords across all blocks
    pub data_codewords: usize,
}

impl EcBlockInfo {
    /// Blocks that carry one data codeword less than the rest
    pub fn num_short_blocks(&self) -> usize {
        self.num_blocks - self.total_codewords % self.num_blocks
    }

    /// Data codewords in a short block
    pub fn short_block_data_len(&self) -> usize {
        self.total_codewords / self.num_blocks - self.ecc_per_block
    }
}

// Tables from the QR Code specification (Model 2), versions 1-10.
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 11]; 4] = [
    [0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18],   // Low
    [0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26],  // Medium
    [0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24],  // Quartile
    [0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28],  // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 11]; 4] = [
    [0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4], // Low
    [0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5], // Medium
    [0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8], // Quartile
    [0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8], // High
];

// Alignment pattern centre coordinates per version (same list for rows and columns)
const ALIGNMENT_PATTERN_POSITIONS: [&[usize]; 11] = [
    &[],
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
];

/// Mode indicator (4 bits) for byte mode
pub const BYTE_MODE_INDICATOR: u32 = 0b0100;

/// Pad codewords appended after the terminator, alternating
pub const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Block layout and codeword counts for a (version, level) pair
pub fn ec_block_info(version: Version, ec_level: ECLevel) -> EcBlockInfo {
    let idx = ec_level_index(ec_level);
    let v = version.number() as usize;
    let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[idx][v] as usize;
    let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize;
    let total_codewords = raw_data_modules(version) / 8;
    EcBlockInfo {
        num_blocks,
        ecc_per_block,
        total_codewords,
        data_codewords: total_codewords - num_blocks * ecc_per_block,
    }
}

/// Modules available for data and ECC bits once every function pattern is
/// drawn (includes the remainder bits).
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Byte-mode capacity of a symbol
pub fn byte_capacity(version: Version, ec_level: ECLevel) -> usize {
    let data_bits = ec_block_info(version, ec_level).data_codewords * 8;
    (data_bits - 4 - version.char_count_bits()) / 8
}

/// Alignment pattern centre coordinates, empty for version 1
pub fn alignment_pattern_positions(version: Version) -> &'static [usize] {
    ALIGNMENT_PATTERN_POSITIONS[version.number() as usize]
}

fn ec_level_index(ec_level: ECLevel) -> usize {
    match ec_level {
        ECLevel::L => 0,
        ECLevel::M => 1,
        ECLevel::Q => 2,
        ECLevel::H => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_total_codewords() {
        let expected = [26, 44, 70, 100, 134, 172, 196, 242, 292, 346];
        for (version, total) in Version::all().zip(expected) {
            assert_eq!(raw_data_modules(version) / 8, total, "version {}", version.number());
        }
    }

    #[test]
    fn test_data_codewords() {
        assert_eq!(ec_block_info(v(1), ECLevel::L).data_codewords, 19);
        assert_eq!(ec_block_info(v(1), ECLevel::H).data_codewords, 9);
        assert_eq!(ec_block_info(v(4), ECLevel::M).data_codewords, 64);
        assert_eq!(ec_block_info(v(5), ECLevel::Q).data_codewords, 62);
        assert_eq!(ec_block_info(v(10), ECLevel::M).data_codewords, 216);
    }

    #[test]
    fn test_short_blocks() {
        // 5-Q: 2 blocks of 15 data codewords, 2 blocks of 16
        let info = ec_block_info(v(5), ECLevel::Q);
        assert_eq!(info.num_blocks, 4);
        assert_eq!(info.num_short_blocks(), 2);
        assert_eq!(info.short_block_data_len(), 15);
    }

    #[test]
    fn test_byte_capacity() {
        assert_eq!(byte_capacity(v(1), ECLevel::L), 17);
        assert_eq!(byte_capacity(v(1), ECLevel::M), 14);
        assert_eq!(byte_capacity(v(4), ECLevel::M), 62);
        assert_eq!(byte_capacity(v(7), ECLevel::H), 64);
        assert_eq!(byte_capacity(v(10), ECLevel::L), 271);
    }

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_pattern_positions(v(1)).is_empty());
        assert_eq!(alignment_pattern_positions(v(4)), &[6, 26]);
        assert_eq!(alignment_pattern_positions(v(7)), &[6, 22, 38]);
        // Last centre is always size - 7
        for version in Version::all().skip(1) {
            let last = *alignment_pattern_positions(version).last().unwrap();
            assert_eq!(last, version.size() - 7);
        }
    }
}
