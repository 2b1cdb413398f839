use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum RasterError {
    /// The requested font name did not resolve to a font file. Raised
    /// before any drawing takes place, so the canvas is untouched.
    #[error("font file not found: {}", .0.display())]
    FontNotFound(PathBuf),

    /// A canvas was requested with a zero dimension
    #[error("invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The canvas drawer reported a failure. Whatever was drawn before the
    /// failing step remains on the canvas; callers should discard it.
    #[error("draw operation failed: {0}")]
    Draw(String),

    #[error(transparent)]
    /// An I/O error occurred while reading a font file
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    /// [fontdue] failed to parse the font for rasterization
    #[error("failed to parse font for rasterization: {0}")]
    GlyphParsing(&'static str),

    #[error(transparent)]
    /// [image] failed to encode the canvas
    Image(#[from] image::ImageError),
}
