/// Main QR encoder that orchestrates the generation pipeline
use crate::encoder::bitstream::encode_data_codewords;
use crate::encoder::config;
use crate::encoder::function_patterns::draw_function_patterns;
use crate::encoder::mask::{masked_candidate, penalty_score, select_mask};
use crate::encoder::placement::place_codewords;
use crate::encoder::reed_solomon::add_ecc_and_interleave;
use crate::encoder::tables::{byte_capacity, ec_block_info};
use crate::error::{Error, Result};
use crate::models::{ECLevel, MaskPattern, QRCode, Version};
use tracing::debug;

/// Configurable QR encoder
///
/// ```
/// use card_qr::{ECLevel, QrEncoder, Version};
///
/// let code = QrEncoder::new(ECLevel::M)
///     .version(Version::new(4).unwrap())
///     .encode("https://example.com/a")
///     .unwrap();
/// assert_eq!(code.module_count(), 33);
/// ```
#[derive(Debug, Clone)]
pub struct QrEncoder {
    ec_level: ECLevel,
    version: Option<Version>,
    mask: Option<MaskPattern>,
    parallel: bool,
}

impl QrEncoder {
    /// Encoder with automatic version and mask selection
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            ec_level,
            version: None,
            mask: None,
            parallel: config::parallel_mask_search(),
        }
    }

    /// Use a fixed version instead of the smallest one that fits
    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Use a fixed mask instead of the lowest-penalty one
    pub fn mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Toggle the parallel mask search
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Encode the UTF-8 bytes of `text`
    pub fn encode(&self, text: &str) -> Result<QRCode> {
        self.encode_bytes(text.as_bytes())
    }

    /// Encode raw bytes in byte mode
    pub fn encode_bytes(&self, data: &[u8]) -> Result<QRCode> {
        let version = match self.version {
            Some(version) => version,
            None => smallest_version(data.len(), self.ec_level)?,
        };

        let info = ec_block_info(version, self.ec_level);
        let data_codewords = encode_data_codewords(data, version, self.ec_level)?;
        let codewords = add_ecc_and_interleave(&data_codewords, &info);
        debug!(
            version = version.number(),
            level = ?self.ec_level,
            bytes = data.len(),
            blocks = info.num_blocks,
            ecc_per_block = info.ecc_per_block,
            "encoded codewords"
        );

        let mut grid = draw_function_patterns(version);
        place_codewords(&mut grid, &codewords);

        let (mask, grid, score) = match self.mask {
            Some(mask) => {
                let grid = masked_candidate(&grid, self.ec_level, mask);
                let score = penalty_score(&grid);
                (mask, grid, score)
            }
            None => select_mask(&grid, self.ec_level, self.parallel),
        };
        debug!(mask = mask.bits(), penalty = score, "mask applied");

        Ok(QRCode::new(version, self.ec_level, mask, grid.finish()?))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new(config::default_ec_level())
    }
}

/// Smallest version whose byte capacity holds `len` bytes
pub fn smallest_version(len: usize, ec_level: ECLevel) -> Result<Version> {
    Version::all()
        .find(|&v| byte_capacity(v, ec_level) >= len)
        .ok_or(Error::CapacityExceeded {
            len,
            capacity: byte_capacity(Version::MAX, ec_level),
        })
}
