//! Rendering of generated symbols
//!
//! The renderers only read a finished [`QRCode`](crate::QRCode); they never
//! change the module grid.

/// Raster output through the `image` crate (RGB, greyscale, PNG)
pub mod raster;
/// Plain-text output for terminals
pub mod text;

use crate::encoder::config;
use crate::error::{Error, Result};
use image::Rgb;

pub use raster::{save_png, to_luma_image, to_rgb_image};
pub use text::to_text;

/// Raster rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output width and height in pixels, at most 4096
    pub size: u32,
    /// Light border around the symbol, in modules, at most 16
    pub quiet_zone: u32,
    /// Colour of dark modules
    pub dark: Rgb<u8>,
    /// Colour of light modules and the quiet zone
    pub light: Rgb<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: config::render_size(),
            quiet_zone: config::quiet_zone(),
            dark: Rgb([0x00, 0x00, 0x00]),
            light: Rgb([0xFF, 0xFF, 0xFF]),
        }
    }
}

/// Parse `RRGGBB` or `#RRGGBB`
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidArgument(format!("bad colour '{value}'")));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| Error::InvalidArgument(format!("bad colour '{value}': {e}")))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}
