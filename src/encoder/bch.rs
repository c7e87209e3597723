/// BCH codes for QR code format and version info
use crate::models::{ECLevel, MaskPattern, Version};

/// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
/// XOR mask applied to the 15-bit format word
const FORMAT_MASK: u16 = 0x5412;
/// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;

/// Remainder of `data * x^degree` modulo `generator`
fn bch_remainder(data: u32, generator: u32, degree: u32) -> u32 {
    let mut rem = data;
    for _ in 0..degree {
        rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
    }
    rem & ((1 << degree) - 1)
}

/// Format and version information encoder
pub struct BchEncoder;

impl BchEncoder {
    /// 15-bit masked format information word
    pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
        let data = ((ec_level.format_bits() as u32) << 3) | mask.bits() as u32;
        let rem = bch_remainder(data, FORMAT_GENERATOR, 10);
        (((data << 10) | rem) as u16) ^ FORMAT_MASK
    }

    /// 18-bit version information word (only drawn for versions 7+)
    pub fn version_bits(version: Version) -> u32 {
        let data = version.number() as u32;
        let rem = bch_remainder(data, VERSION_GENERATOR, 12);
        (data << 12) | rem
    }

}
