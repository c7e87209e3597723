/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use crate::encoder::tables::EcBlockInfo;

/// GF(256) field operations using log/exp tables
pub struct Gf256;

static LOG_TABLE: [u8; 256] = [
    0, 0, 1, 25, 2, 50, 26, 198, 3, 223, 51, 238, 27, 104, 199, 75, 4, 100, 224, 14, 52, 141, 239,
    129, 28, 193, 105, 248, 200, 8, 76, 113, 5, 138, 101, 47, 225, 36, 15, 33, 53, 147, 142, 218,
    240, 18, 130, 69, 29, 181, 194, 125, 106, 39, 249, 185, 201, 154, 9, 120, 77, 228, 114, 166, 6,
    191, 139, 98, 102, 221, 48, 253, 226, 152, 37, 179, 16, 145, 34, 136, 54, 208, 148, 206, 143,
    150, 219, 189, 241, 210, 19, 92, 131, 56, 70, 64, 30, 66, 182, 163, 195, 72, 126, 110, 107, 58,
    40, 84, 250, 133, 186, 61, 202, 94, 155, 159, 10, 21, 121, 43, 78, 212, 229, 172, 115, 243,
    167, 87, 7, 112, 192, 247, 140, 128, 99, 13, 103, 74, 222, 237, 49, 197, 254, 24, 227, 165,
    153, 119, 38, 184, 180, 124, 17, 68, 146, 217, 35, 32, 137, 46, 55, 63, 209, 91, 149, 188, 207,
    205, 144, 135, 151, 178, 220, 252, 190, 97, 242, 86, 211, 171, 20, 42, 93, 158, 132, 60, 57,
    83, 71, 109, 65, 162, 31, 45, 67, 216, 183, 123, 164, 118, 196, 23, 73, 236, 127, 12, 111, 246,
    108, 161, 59, 82, 41, 157, 85, 170, 251, 96, 134, 177, 187, 204, 62, 90, 203, 89, 95, 176, 156,
    169, 160, 81, 11, 245, 22, 235, 122, 117, 44, 215, 79, 174, 213, 233, 230, 231, 173, 232, 116,
    214, 244, 234, 168, 80, 88, 175,
];

static EXP_TABLE: [u8; 256] = [
    1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38, 76, 152, 45, 90, 180, 117,
    234, 201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156, 37, 74, 148, 53, 106, 212, 181,
    119, 238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93, 186, 105, 210, 185, 111, 222, 161,
    95, 190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30, 60, 120, 240, 253, 231, 211, 187,
    107, 214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226, 217, 175, 67, 134, 17, 34, 68, 136,
    13, 26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248, 237, 199, 147, 59, 118, 236, 197,
    151, 51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79, 158, 33, 66, 132, 21, 42, 84, 168,
    77, 154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213, 183, 115, 230, 209, 191, 99, 198,
    145, 63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227, 219, 171, 75, 150, 49, 98, 196, 149,
    55, 110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200, 141, 7, 14, 28, 56, 112, 224, 221, 167,
    83, 166, 81, 162, 89, 178, 121, 242, 249, 239, 195, 155, 43, 86, 172, 69, 138, 9, 18, 36, 72,
    144, 61, 122, 244, 245, 247, 243, 251, 235, 203, 139, 11, 22, 44, 88, 176, 125, 250, 233, 207,
    131, 27, 54, 108, 216, 173, 71, 142, 1,
];

impl Gf256 {
    /// Product in GF(256)
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// alpha^n
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }
}

/// Reed-Solomon encoder producing `num_ecc_codewords` ECC bytes per block
pub struct ReedSolomonEncoder {
    /// Generator coefficients, highest degree first, leading 1 omitted
    divisor: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Build the generator polynomial with roots alpha^0 .. alpha^(n-1)
    pub fn new(num_ecc_codewords: usize) -> Self {
        assert!(num_ecc_codewords > 0, "ECC length must be positive");
        let mut divisor = vec![0u8; num_ecc_codewords];
        divisor[num_ecc_codewords - 1] = 1;

        let mut root = 1u8;
        for _ in 0..num_ecc_codewords {
            // Multiply by (x - root)
            for j in 0..num_ecc_codewords {
                divisor[j] = Gf256::mul(divisor[j], root);
                if j + 1 < num_ecc_codewords {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Gf256::mul(root, 0x02);
        }

        Self { divisor }
    }

    /// ECC codewords produced per block
    pub fn num_ecc_codewords(&self) -> usize {
        self.divisor.len()
    }

    /// Remainder of data * x^n divided by the generator
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut remainder = vec![0u8; self.divisor.len()];
        for &byte in data {
            let factor = byte ^ remainder.remove(0);
            remainder.push(0);
            for (r, &coeff) in remainder.iter_mut().zip(&self.divisor) {
                *r ^= Gf256::mul(coeff, factor);
            }
        }
        remainder
    }
}

/// Split data codewords into blocks, append ECC to each, and interleave
///
/// `data` must hold exactly `info.data_codewords` bytes.
pub fn add_ecc_and_interleave(data: &[u8], info: &EcBlockInfo) -> Vec<u8> {
    debug_assert_eq!(data.len(), info.data_codewords);

    let encoder = ReedSolomonEncoder::new(info.ecc_per_block);
    let short_len = info.short_block_data_len();
    let num_short = info.num_short_blocks();

    let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = short_len + usize::from(i >= num_short);
        let block = &data[offset..offset + len];
        blocks.push((block, encoder.encode(block)));
        offset += len;
    }

    let mut result = Vec::with_capacity(info.total_codewords);
    for i in 0..=short_len {
        for (block, _) in &blocks {
            if let Some(&byte) = block.get(i) {
                result.push(byte);
            }
        }
    }
    for i in 0..info.ecc_per_block {
        for (_, ecc) in &blocks {
            result.push(ecc[i]);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::ec_block_info;
    use crate::models::{ECLevel, Version};

    /// Syndromes of a codeword in descending order (c[0] is the x^(n-1) term)
    fn syndromes(codeword: &[u8], num_ecc: usize) -> Vec<u8> {
        let n = codeword.len();
        (0..num_ecc)
            .map(|i| {
                codeword.iter().enumerate().fold(0u8, |sum, (j, &c)| {
                    sum ^ Gf256::mul(c, Gf256::exp(i * (n - 1 - j)))
                })
            })
            .collect()
    }

    #[test]
    fn test_gf256_basic() {
        // 0 * anything = 0
        assert_eq!(Gf256::mul(0, 5), 0);
        assert_eq!(Gf256::mul(5, 0), 0);
        assert_eq!(Gf256::mul(1, 123), 123);
        // alpha^8 = x^4 + x^3 + x^2 + 1
        assert_eq!(Gf256::mul(128, 2), 29);
        assert_eq!(Gf256::exp(255), 1);
        assert_eq!(Gf256::exp(260), Gf256::exp(5));
    }

    #[test]
    fn test_known_ecc_vector() {
        // "HELLO WORLD" as 1-M alphanumeric data codewords
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let ecc = ReedSolomonEncoder::new(10).encode(&data);
        assert_eq!(ecc, vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]);
    }

    #[test]
    fn test_codeword_has_zero_syndromes() {
        let data: Vec<u8> = "https://example.com/a".bytes().collect();
        let encoder = ReedSolomonEncoder::new(18);
        let mut codeword = data.clone();
        codeword.extend(encoder.encode(&data));
        assert!(syndromes(&codeword, 18).iter().all(|&s| s == 0));

        codeword[3] ^= 0x55;
        assert!(syndromes(&codeword, 18).iter().any(|&s| s != 0));
    }

    #[test]
    fn test_interleave_single_block() {
        let info = ec_block_info(Version::new(1).unwrap(), ECLevel::M);
        let data: Vec<u8> = (0..16).collect();
        let out = add_ecc_and_interleave(&data, &info);
        assert_eq!(out.len(), 26);
        assert_eq!(&out[..16], &data[..]);
        assert_eq!(&out[16..], &ReedSolomonEncoder::new(10).encode(&data)[..]);
    }

    #[test]
    fn test_interleave_short_and_long_blocks() {
        // 5-Q: blocks of 15, 15, 16, 16 data codewords, 18 ECC each
        let info = ec_block_info(Version::new(5).unwrap(), ECLevel::Q);
        let data: Vec<u8> = (0..62).collect();
        let out = add_ecc_and_interleave(&data, &info);
        assert_eq!(out.len(), info.total_codewords);

        // First column takes the first byte of each block
        assert_eq!(&out[..4], &[0, 15, 30, 46]);
        // Short blocks run out after 15 columns; only long blocks give a 16th byte
        assert_eq!(&out[60..62], &[45, 61]);

        let ecc_first = ReedSolomonEncoder::new(18).encode(&data[0..15]);
        let ecc_last = ReedSolomonEncoder::new(18).encode(&data[46..62]);
        assert_eq!(out[62], ecc_first[0]);
        assert_eq!(out[65], ecc_last[0]);
        assert_eq!(*out.last().unwrap(), *ecc_last.last().unwrap());
    }
}
