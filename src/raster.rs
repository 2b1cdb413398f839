use crate::{BoundingBox, CanvasDrawer, Colour, DrawResult, FontSpec, RasterError};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::io::{Seek, Write};
use std::path::PathBuf;

/// A software canvas: an RGBA image buffer plus a cache of rasterizable
/// fonts. Created blank (opaque black) with the alpha channel enabled so
/// translucent overlay fills composite correctly.
pub struct RasterCanvas {
    image: RgbaImage,
    glyphs: HashMap<PathBuf, fontdue::Font>,
}

impl RasterCanvas {
    /// Allocate a new blank canvas of the given pixel dimensions. Both
    /// dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<RasterCanvas, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        Ok(RasterCanvas {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            glyphs: HashMap::new(),
        })
    }

    /// Borrow the underlying pixel buffer
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the canvas, yielding the pixel buffer
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the canvas as a PNG into `writer`
    pub fn write_png<W: Write + Seek>(&self, writer: &mut W) -> Result<(), RasterError> {
        self.image.write_to(writer, image::ImageOutputFormat::Png)?;
        Ok(())
    }

    fn ensure_glyph_font(&mut self, path: &PathBuf) -> Result<(), RasterError> {
        if !self.glyphs.contains_key(path) {
            let bytes = std::fs::read(path)?;
            let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
                .map_err(RasterError::GlyphParsing)?;
            self.glyphs.insert(path.clone(), font);
        }
        Ok(())
    }
}

/// Source-over blend of `colour` into `px` at the given weight in [0, 1]
fn blend(px: &mut Rgba<u8>, colour: Colour, weight: f32) {
    let w = weight.clamp(0.0, 1.0);
    if w <= 0.0 {
        return;
    }
    let mix = |src: u8, dst: u8| (src as f32 * w + dst as f32 * (1.0 - w)).round() as u8;
    px.0 = [
        mix(colour.r, px.0[0]),
        mix(colour.g, px.0[1]),
        mix(colour.b, px.0[2]),
        mix(255, px.0[3]),
    ];
}

fn blend_px(image: &mut RgbaImage, x: i32, y: i32, colour: Colour, weight: f32) {
    if x < 0 || y < 0 || x >= image.width() as i32 || y >= image.height() as i32 {
        return;
    }
    blend(image.get_pixel_mut(x as u32, y as u32), colour, weight);
}

impl CanvasDrawer for RasterCanvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        colour: Colour,
        alpha: u8,
    ) -> Result<(), RasterError> {
        let weight = 1.0 - alpha.min(127) as f32 / 127.0;
        if weight <= 0.0 {
            return Ok(());
        }
        let left = x0.min(x1).max(0);
        let right = x0.max(x1).min(self.image.width() as i32 - 1);
        let top = y0.min(y1).max(0);
        let bottom = y0.max(y1).min(self.image.height() as i32 - 1);
        for y in top..=bottom {
            for x in left..=right {
                blend_px(&mut self.image, x, y, colour, weight);
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        colour: Colour,
        font: &FontSpec,
        text: &str,
    ) -> Result<DrawResult, RasterError> {
        self.ensure_glyph_font(&font.path)?;
        let glyph_font = &self.glyphs[&font.path];
        let image = &mut self.image;

        let rotated = font.angle % 360 != 0;
        let theta = (font.angle as f32).to_radians();
        let (sin, cos) = theta.sin_cos();

        let origin_x = x as f32;
        let origin_y = y as f32;
        let mut min_x = origin_x;
        let mut min_y = origin_y;
        let mut max_x = origin_x;
        let mut max_y = origin_y;
        let mut expand = |px: f32, py: f32| {
            min_x = min_x.min(px);
            min_y = min_y.min(py);
            max_x = max_x.max(px);
            max_y = max_y.max(py);
        };

        let mut pen = 0f32;
        for ch in text.chars() {
            let (m, coverage) = glyph_font.rasterize(ch, font.size);
            // offsets of the glyph bitmap's top-left corner relative to the
            // baseline origin, before rotation
            let left = pen + m.xmin as f32;
            let top = -(m.ymin as f32 + m.height as f32);
            let w = m.width as f32;
            let h = m.height as f32;

            if m.width > 0 && m.height > 0 {
                if !rotated {
                    let bx = (origin_x + left).round() as i32;
                    let by = (origin_y + top).round() as i32;
                    for row in 0..m.height {
                        for col in 0..m.width {
                            let cov = coverage[row * m.width + col];
                            if cov == 0 {
                                continue;
                            }
                            blend_px(
                                image,
                                bx + col as i32,
                                by + row as i32,
                                colour,
                                cov as f32 / 255.0,
                            );
                        }
                    }
                    expand(origin_x + left, origin_y + top);
                    expand(origin_x + left + w, origin_y + top + h);
                } else {
                    // rotate the glyph's rectangle about the baseline origin
                    // and inverse-sample the coverage bitmap inside it
                    let corners = [
                        (left, top),
                        (left + w, top),
                        (left + w, top + h),
                        (left, top + h),
                    ];
                    let mut lo = (f32::INFINITY, f32::INFINITY);
                    let mut hi = (f32::NEG_INFINITY, f32::NEG_INFINITY);
                    for (dx, dy) in corners {
                        let rx = origin_x + dx * cos + dy * sin;
                        let ry = origin_y - dx * sin + dy * cos;
                        lo = (lo.0.min(rx), lo.1.min(ry));
                        hi = (hi.0.max(rx), hi.1.max(ry));
                        expand(rx, ry);
                    }
                    for ty in lo.1.floor() as i32..=hi.1.ceil() as i32 {
                        for tx in lo.0.floor() as i32..=hi.0.ceil() as i32 {
                            let dx = tx as f32 - origin_x;
                            let dy = ty as f32 - origin_y;
                            let ux = dx * cos - dy * sin;
                            let uy = dx * sin + dy * cos;
                            let col = (ux - left).floor() as i32;
                            let row = (uy - top).floor() as i32;
                            if col < 0 || row < 0 || col >= m.width as i32 || row >= m.height as i32
                            {
                                continue;
                            }
                            let cov = coverage[row as usize * m.width + col as usize];
                            if cov == 0 {
                                continue;
                            }
                            blend_px(image, tx, ty, colour, cov as f32 / 255.0);
                        }
                    }
                }
            }

            pen += m.advance_width;
        }

        // the pen's end point counts toward the extents so trailing
        // advance-only glyphs (spaces) widen the result
        expand(origin_x + pen * cos, origin_y - pen * sin);

        Ok(DrawResult {
            bounds: BoundingBox::from_extents(min_x, min_y, max_x, max_y),
        })
    }

    fn flood_fill(&mut self, x: i32, y: i32, colour: Colour) -> Result<(), RasterError> {
        let w = self.image.width() as i32;
        let h = self.image.height() as i32;
        if x < 0 || y < 0 || x >= w || y >= h {
            return Ok(());
        }
        let fill = Rgba([colour.r, colour.g, colour.b, 255]);
        let target = *self.image.get_pixel(x as u32, y as u32);
        if target == fill {
            return Ok(());
        }

        let mut stack = vec![(x, y)];
        while let Some((sx, sy)) = stack.pop() {
            if *self.image.get_pixel(sx as u32, sy as u32) != target {
                continue;
            }
            let mut x0 = sx;
            while x0 > 0 && *self.image.get_pixel(x0 as u32 - 1, sy as u32) == target {
                x0 -= 1;
            }
            let mut x1 = sx;
            while x1 + 1 < w && *self.image.get_pixel(x1 as u32 + 1, sy as u32) == target {
                x1 += 1;
            }
            for cx in x0..=x1 {
                self.image.put_pixel(cx as u32, sy as u32, fill);
            }
            for ny in [sy - 1, sy + 1] {
                if ny < 0 || ny >= h {
                    continue;
                }
                let mut cx = x0;
                while cx <= x1 {
                    if *self.image.get_pixel(cx as u32, ny as u32) == target {
                        stack.push((cx, ny));
                        while cx <= x1 && *self.image.get_pixel(cx as u32, ny as u32) == target {
                            cx += 1;
                        }
                    } else {
                        cx += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
