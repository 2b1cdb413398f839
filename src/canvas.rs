use crate::{BoundingBox, Colour, FontSpec, RasterError};

/// The raw result handle of a text blit: the extents the text actually
/// covered on the canvas
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DrawResult {
    pub bounds: BoundingBox,
}

/// A raster surface the engine can draw onto. The engine composes one of
/// these rather than extending a concrete image type, so rasterization
/// backends (software, GPU, headless test fakes) are substitutable.
///
/// All coordinates are integer pixel offsets from the canvas's top-left
/// origin. Implementations report failures as [RasterError::Draw]; the
/// engine propagates them without retrying.
pub trait CanvasDrawer {
    /// Canvas width in pixels
    fn width(&self) -> u32;

    /// Canvas height in pixels
    fn height(&self) -> u32;

    /// Fill the rectangle spanned by the two corners with `colour`.
    /// `alpha` is in the 0–127 unit of [crate::alpha_from_transparency]:
    /// 0 paints opaquely, 127 leaves the canvas unchanged.
    fn fill_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        colour: Colour,
        alpha: u8,
    ) -> Result<(), RasterError>;

    /// Draw `text` with its baseline origin at `(x, y)`, returning the
    /// extents it covered
    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        colour: Colour,
        font: &FontSpec,
        text: &str,
    ) -> Result<DrawResult, RasterError>;

    /// Flood-fill with `colour` starting from `(x, y)`, following
    /// 4-connected pixel regions
    fn flood_fill(&mut self, x: i32, y: i32, colour: Colour) -> Result<(), RasterError>;

    /// Finalize the canvas after a batch of draw operations. Backends that
    /// buffer or persist output can override; the default does nothing.
    fn save(&mut self) -> Result<(), RasterError> {
        Ok(())
    }
}
