use super::RenderOptions;
use crate::encoder::config::{MAX_QUIET_ZONE, MAX_RENDER_SIZE};
use crate::error::{Error, Result};
use crate::models::QRCode;
use image::{GrayImage, ImageFormat, Luma, RgbImage};
use std::path::Path;
use tracing::debug;

/// Map a pixel coordinate to a module index, `None` inside the quiet zone
///
/// Integer mapping `p * total / size` spreads a fractional module size over
/// the whole canvas without gaps.
fn module_at(pixel: u32, size: u32, quiet_zone: u32, module_count: u32) -> Option<usize> {
    let total = module_count + 2 * quiet_zone;
    let module = (pixel as u64 * total as u64 / size as u64) as u32;
    (quiet_zone..quiet_zone + module_count)
        .contains(&module)
        .then(|| (module - quiet_zone) as usize)
}

fn check_size(code: &QRCode, options: &RenderOptions) -> Result<()> {
    if options.quiet_zone > MAX_QUIET_ZONE {
        return Err(Error::InvalidArgument(format!(
            "quiet zone {} exceeds {} modules",
            options.quiet_zone, MAX_QUIET_ZONE
        )));
    }
    if options.size > MAX_RENDER_SIZE {
        return Err(Error::InvalidArgument(format!(
            "image size {}px exceeds {}px",
            options.size, MAX_RENDER_SIZE
        )));
    }
    let total = options
        .quiet_zone
        .checked_mul(2)
        .and_then(|border| border.checked_add(code.module_count() as u32))
        .ok_or_else(|| Error::InvalidArgument("quiet zone too wide".to_string()))?;
    if options.size < total {
        return Err(Error::InvalidArgument(format!(
            "image size {}px is smaller than {} modules",
            options.size, total
        )));
    }
    Ok(())
}

fn is_dark_pixel(code: &QRCode, options: &RenderOptions, x: u32, y: u32) -> bool {
    let n = code.module_count() as u32;
    match (
        module_at(y, options.size, options.quiet_zone, n),
        module_at(x, options.size, options.quiet_zone, n),
    ) {
        (Some(row), Some(col)) => code.is_dark(row, col),
        _ => false,
    }
}

/// Render to an RGB image of `options.size` x `options.size` pixels
pub fn to_rgb_image(code: &QRCode, options: &RenderOptions) -> Result<RgbImage> {
    check_size(code, options)?;
    Ok(RgbImage::from_fn(options.size, options.size, |x, y| {
        if is_dark_pixel(code, options, x, y) {
            options.dark
        } else {
            options.light
        }
    }))
}

/// Render to a black-on-white greyscale image (colours are ignored)
pub fn to_luma_image(code: &QRCode, options: &RenderOptions) -> Result<GrayImage> {
    check_size(code, options)?;
    Ok(GrayImage::from_fn(options.size, options.size, |x, y| {
        if is_dark_pixel(code, options, x, y) {
            Luma([0])
        } else {
            Luma([255])
        }
    }))
}

/// Render and write a PNG file
pub fn save_png(code: &QRCode, path: impl AsRef<Path>, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    let image = to_rgb_image(code, options)?;
    image.save_with_format(path, ImageFormat::Png)?;
    debug!(path = %path.display(), size = options.size, "wrote PNG");
    Ok(())
}
