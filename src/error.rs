//! Error type shared by geometry validation, orientation parsing, and factory setup.

use thiserror::Error;

/// Configuration failures detected before any tile is produced.
///
/// Degenerate borders and empty grids are deliberately absent: both are
/// valid inputs with a documented (if useless) result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TileError {
    /// Side length was zero, negative, NaN, or infinite.
    #[error("side length must be a positive finite number, got {0}")]
    InvalidSideLength(f32),

    /// Border width was negative, NaN, or infinite.
    #[error("hex border must be a non-negative finite number, got {0}")]
    InvalidBorder(f32),

    /// Orientation name did not match `vertical` or `horizontal`.
    #[error("unknown orientation `{0}`, expected `vertical` or `horizontal`")]
    UnknownOrientation(String),

    /// The rendering surface cannot rasterize polygons.
    #[error("rendering surface `{0}` cannot rasterize polygons")]
    UnsupportedSurface(&'static str),

    /// The template texture would exceed [`MAX_TEXTURE_SIDE`](crate::surface::MAX_TEXTURE_SIDE).
    #[error("tile texture {width}x{height} exceeds the {max}px limit")]
    TextureTooLarge {
        /// Requested texture width in pixels.
        width: u32,
        /// Requested texture height in pixels.
        height: u32,
        /// Largest allowed side.
        max: u32,
    },
}
