//! QR code encoding modules
//!
//! Everything needed to turn bytes into a finished symbol:
//! - Byte-mode bitstream and padding
//! - Error correction (Reed-Solomon, BCH)
//! - Function patterns, codeword placement and masking

/// BCH codes for format and version info
pub mod bch;
/// Bit buffer and data codeword assembly
pub mod bitstream;
/// Environment-driven defaults
pub mod config;
/// Finder, timing, alignment, format and version patterns
pub mod function_patterns;
/// Mask application and penalty-based mask selection
pub mod mask;
/// Zigzag codeword placement
pub mod placement;
/// Main QR encoder that orchestrates the generation pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// QR specification tables (ECC codewords/blocks, alignment positions)
pub mod tables;
