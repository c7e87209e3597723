//! Error types for QR generation and rendering

use thiserror::Error;

/// Result type alias using the crate's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while generating or rendering a QR code
#[derive(Error, Debug)]
pub enum Error {
    /// Version outside the supported 1-10 range
    #[error("unsupported QR version {0} (expected 1-10)")]
    InvalidVersion(u8),

    /// Input does not fit the byte-mode capacity of the chosen version/level
    #[error("input is {len} bytes but the symbol holds at most {capacity}")]
    CapacityExceeded {
        /// Input length in bytes
        len: usize,
        /// Byte capacity of the requested symbol
        capacity: usize,
    },

    /// A module was left unassigned after generation
    #[error("module ({row}, {col}) was never assigned")]
    UnresolvedModule {
        /// Row of the first unresolved module
        row: usize,
        /// Column of the first unresolved module
        col: usize,
    },

    /// Bad renderer or command line argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Image encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
