use crate::{BoundingBox, FontLibrary, Px, RasterError};
use owned_ttf_parser::AsFaceRef;
use std::path::PathBuf;

/// A font selection for a single measurement or draw call: the resolved
/// font file, the pixel em size, and the rotation angle in degrees
/// (counter-clockwise on screen)
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub path: PathBuf,
    pub size: f32,
    pub angle: i32,
}

impl FontSpec {
    pub fn new<P: Into<PathBuf>>(path: P, size: f32, angle: i32) -> FontSpec {
        FontSpec {
            path: path.into(),
            size,
            angle,
        }
    }

    /// The same font and size with rotation removed; wrapping always
    /// measures horizontally
    pub fn upright(&self) -> FontSpec {
        FontSpec {
            path: self.path.clone(),
            size: self.size,
            angle: 0,
        }
    }
}

/// Measures how large a string renders in a given font and size without
/// drawing it. The layout code calls this per candidate line to decide wrap
/// points and per final line to compute draw offsets and overlay boxes.
pub trait FontMetrics {
    /// The tight bounding box of `text` rendered in `font`, relative to the
    /// baseline origin, in y-down pixel coordinates
    fn measure(&mut self, font: &FontSpec, text: &str) -> Result<BoundingBox, RasterError>;

    /// The vertical distance between successive baselines for `font`. The
    /// default derives it from the measured ascent-to-descent extent of a
    /// reference string; implementations with access to face tables can do
    /// better.
    fn line_height(&mut self, font: &FontSpec) -> Result<Px, RasterError> {
        Ok(self.measure(&font.upright(), "Mg")?.height())
    }
}

/// Font metrics computed from parsed TrueType faces: per-glyph horizontal
/// advances and tight glyph boxes accumulated into run extents
#[derive(Default)]
pub struct FaceMetrics {
    faces: FontLibrary,
}

impl FaceMetrics {
    pub fn new() -> FaceMetrics {
        FaceMetrics::default()
    }
}

impl FontMetrics for FaceMetrics {
    fn measure(&mut self, font: &FontSpec, text: &str) -> Result<BoundingBox, RasterError> {
        let face = self.faces.load(&font.path)?.face.as_face_ref();
        let scaling = font.size / face.units_per_em() as f32;

        let mut pen = 0f32;
        let mut x_min = 0f32;
        let mut x_max = 0f32;
        let mut above = 0f32;
        let mut below = 0f32;
        for ch in text.chars() {
            let gid = face
                .glyph_index(ch)
                .or_else(|| face.glyph_index('\u{FFFD}'))
                .or_else(|| face.glyph_index('?'));
            let Some(gid) = gid else {
                continue;
            };

            if let Some(bb) = face.glyph_bounding_box(gid) {
                x_min = x_min.min(pen + bb.x_min as f32 * scaling);
                x_max = x_max.max(pen + bb.x_max as f32 * scaling);
                above = above.max(bb.y_max as f32 * scaling);
                below = below.min(bb.y_min as f32 * scaling);
            }

            pen += face.glyph_hor_advance(gid).unwrap_or_default() as f32 * scaling;
            x_max = x_max.max(pen);
        }

        // font units are y-up relative to the baseline; flip into the
        // canvas's y-down frame
        let bbox = BoundingBox::from_extents(x_min, -above, x_max, -below);
        Ok(bbox.rotate(font.angle))
    }

    fn line_height(&mut self, font: &FontSpec) -> Result<Px, RasterError> {
        Ok(self.faces.load(&font.path)?.line_height(font.size))
    }
}
