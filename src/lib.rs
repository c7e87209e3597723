//! card_qr - offline QR code generator
//!
//! A pure Rust QR Model 2 encoder (versions 1-10, byte mode, all four error
//! correction levels) used to share a digital business card URL without any
//! network service. Rendering to images and text lives in [`render`].

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (bitstream, error correction, placement, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QRCode, ModuleGrid, Version, etc.)
pub mod models;
/// Raster and text renderers
pub mod render;

pub use encoder::qr_encoder::QrEncoder;
pub use error::{Error, Result};
pub use models::{ECLevel, MaskPattern, Module, ModuleGrid, QRCode, Version};
pub use render::RenderOptions;

/// Generate a QR code for `text` at a fixed version and error correction level
///
/// The mask is chosen by penalty score. Fails with
/// [`Error::InvalidVersion`] outside 1-10 and [`Error::CapacityExceeded`] when
/// the UTF-8 bytes of `text` do not fit.
///
/// # Example
/// ```
/// use card_qr::{ECLevel, generate};
///
/// let code = generate("https://example.com/a", 4, ECLevel::M).unwrap();
/// assert_eq!(code.module_count(), 33);
/// assert!(code.is_dark(0, 0));
/// ```
pub fn generate(text: &str, version: u8, ec_level: ECLevel) -> Result<QRCode> {
    let version = Version::new(version)?;
    QrEncoder::new(ec_level).version(version).encode(text)
}

/// Byte-mode capacity of a (version, level) pair
pub fn capacity(version: u8, ec_level: ECLevel) -> Result<usize> {
    let version = Version::new(version)?;
    Ok(encoder::tables::byte_capacity(version, ec_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_invalid_version() {
        assert!(matches!(
            generate("x", 0, ECLevel::M),
            Err(Error::InvalidVersion(0))
        ));
        assert!(matches!(
            generate("x", 11, ECLevel::M),
            Err(Error::InvalidVersion(11))
        ));
    }

    #[test]
    fn test_generate_empty_text() {
        let code = generate("", 1, ECLevel::H).unwrap();
        assert_eq!(code.module_count(), 21);
    }

    #[test]
    fn test_capacity() {
        assert_eq!(capacity(4, ECLevel::M).unwrap(), 62);
        assert!(capacity(12, ECLevel::M).is_err());
    }
}
