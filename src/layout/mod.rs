//! Text measurement, wrapping, and placement.
//!
//! This module turns a string, a font, and a width budget into an ordered
//! sequence of positioned lines with their measured extents, ready to be
//! drawn onto any raster surface. Measurement goes through the
//! [FontMetrics](crate::FontMetrics) trait, so the same layout code runs
//! against real TrueType faces and headless test fakes alike.
//!
//! # Example
//!
//! ```
//! use textblit::layout::{place_lines, wrap_words};
//! use textblit::{BoundingBox, FontMetrics, FontSpec, Px, RasterError};
//!
//! // a fixed-pitch metrics provider: every character is 8px wide
//! struct Grid;
//! impl FontMetrics for Grid {
//!     fn measure(&mut self, font: &FontSpec, text: &str) -> Result<BoundingBox, RasterError> {
//!         let width = text.chars().count() as f32 * 8.0;
//!         Ok(BoundingBox::from_extents(0.0, -font.size, width, 0.0))
//!     }
//! }
//!
//! let font = FontSpec::new("grid.ttf", 12.0, 0);
//! let lines = wrap_words(&mut Grid, &font, Px(100.0), "the quick brown fox", false)?;
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].text, "the quick");
//!
//! let placed = place_lines(&mut Grid, &font, lines, 0, 0)?;
//! assert_eq!(placed[1].y, 12);
//! # Ok::<(), RasterError>(())
//! ```

mod wrap;

pub use wrap::*;

use crate::{BoundingBox, Colour, FontMetrics, FontSpec, Px, RasterError};

/// The reference glyph used to normalize vertical placement: its measured
/// height converts a visual-top coordinate into the baseline coordinate the
/// drawer expects, consistently across fonts and sizes.
const REFERENCE_GLYPH: &str = "M";

/// Calculates the vertical offset from a visual-top text coordinate to the
/// font's baseline, as the measured height of a reference glyph
pub fn baseline_offset<M: FontMetrics>(
    metrics: &mut M,
    font: &FontSpec,
) -> Result<Px, RasterError> {
    Ok(metrics.measure(font, REFERENCE_GLYPH)?.height())
}

/// A line with its draw origin and measured extents
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// x of the line's baseline origin
    pub x: i32,
    /// y of the line's baseline origin
    pub y: i32,
    /// the line's measured extents, relative to the baseline origin
    pub bounds: BoundingBox,
}

/// A filled rectangle drawn behind text to improve legibility
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OverlayBox {
    pub colour: Colour,
    /// alpha in the rasterizer's 0–127 unit
    pub alpha: u8,
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

/// The output artifact of a layout pass: positioned lines plus the colours
/// to draw them with. Produced and consumed within a single rendering call;
/// it has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub lines: Vec<PlacedLine>,
    pub colour: Colour,
    pub overlay: Option<OverlayBox>,
}

/// Assign draw origins to wrapped lines: line `i` sits at
/// `(left, top + i × line_height)`, where the line height comes from the
/// metrics provider, so successive lines do not overlap
pub fn place_lines<M: FontMetrics>(
    metrics: &mut M,
    font: &FontSpec,
    lines: Vec<Line>,
    left: i32,
    top: i32,
) -> Result<Vec<PlacedLine>, RasterError> {
    let line_height = metrics.line_height(font)?;
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let bounds = metrics.measure(font, &line.text)?;
            Ok(PlacedLine {
                text: line.text,
                x: left,
                y: top + (line_height * index as f32).round(),
                bounds,
            })
        })
        .collect()
}
