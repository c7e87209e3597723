/// Packed bit matrix
pub mod matrix;
/// Tri-state module grid with its function-pattern map
pub mod module_grid;
/// Version, level, mask and the finished symbol
pub mod qr_code;

pub use matrix::BitMatrix;
pub use module_grid::{Module, ModuleGrid};
pub use qr_code::{ECLevel, MaskPattern, QRCode, Version};
