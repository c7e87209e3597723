use crate::models::ECLevel;
use std::sync::OnceLock;

/// Smallest accepted render size in pixels (one pixel per version 1 module)
pub const MIN_RENDER_SIZE: u32 = 21;
/// Largest accepted render size in pixels
pub const MAX_RENDER_SIZE: u32 = 4096;
/// Widest accepted quiet zone in modules
pub const MAX_QUIET_ZONE: u32 = 16;

const DEFAULT_RENDER_SIZE: u32 = 256;
const DEFAULT_QUIET_ZONE: u32 = 4;

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_u32(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_bool_u8(raw: Option<&str>, default: bool) -> bool {
    raw.and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

fn parse_ec_level(raw: Option<&str>) -> ECLevel {
    raw.and_then(|v| ECLevel::from_letter(v).ok())
        .unwrap_or(ECLevel::M)
}

fn clamp_render_size(raw: Option<&str>) -> u32 {
    parse_u32(raw, DEFAULT_RENDER_SIZE).clamp(MIN_RENDER_SIZE, MAX_RENDER_SIZE)
}

fn clamp_quiet_zone(raw: Option<&str>) -> u32 {
    parse_u32(raw, DEFAULT_QUIET_ZONE).min(MAX_QUIET_ZONE)
}

static DEFAULT_EC_LEVEL: OnceLock<ECLevel> = OnceLock::new();

/// Level used when none is given (`QR_DEFAULT_LEVEL`, default M)
pub fn default_ec_level() -> ECLevel {
    *DEFAULT_EC_LEVEL.get_or_init(|| parse_ec_level(env_value("QR_DEFAULT_LEVEL").as_deref()))
}

static RENDER_SIZE: OnceLock<u32> = OnceLock::new();

/// Rendered image side in pixels (`QR_RENDER_SIZE`, default 256)
pub fn render_size() -> u32 {
    *RENDER_SIZE.get_or_init(|| clamp_render_size(env_value("QR_RENDER_SIZE").as_deref()))
}

static QUIET_ZONE: OnceLock<u32> = OnceLock::new();

/// Quiet zone width in modules (`QR_QUIET_ZONE`, default 4)
pub fn quiet_zone() -> u32 {
    *QUIET_ZONE.get_or_init(|| clamp_quiet_zone(env_value("QR_QUIET_ZONE").as_deref()))
}

static PARALLEL_MASK_SEARCH: OnceLock<bool> = OnceLock::new();

/// Evaluate mask candidates on the rayon pool (`QR_PARALLEL_MASK_SEARCH`, default 1)
pub fn parallel_mask_search() -> bool {
    *PARALLEL_MASK_SEARCH
        .get_or_init(|| parse_bool_u8(env_value("QR_PARALLEL_MASK_SEARCH").as_deref(), true))
}
