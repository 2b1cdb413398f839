use crate::{Px, RasterError};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A parsed font object. Fonts can be TTF or OTF fonts; the face is held in
/// its entirety in memory for the lifetime of the store that loaded it.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error
    /// if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, RasterError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Calculate the ascent (distance from the baseline to the top of the
    /// font) for the given pixel size
    pub fn ascent(&self, size: f32) -> Px {
        let scaling = size / self.face.as_face_ref().units_per_em() as f32;
        Px(self.face.as_face_ref().ascender() as f32 * scaling)
    }

    /// Calculate the descent (distance from the baseline to the bottom of
    /// the font) for the given pixel size. Note: this is usually negative
    pub fn descent(&self, size: f32) -> Px {
        let scaling = size / self.face.as_face_ref().units_per_em() as f32;
        Px(self.face.as_face_ref().descender() as f32 * scaling)
    }

    /// Calculate the leading (extra space between lines) for the given
    /// pixel size
    pub fn leading(&self, size: f32) -> Px {
        let scaling = size / self.face.as_face_ref().units_per_em() as f32;
        Px(self.face.as_face_ref().line_gap() as f32 * scaling)
    }

    /// Calculate the default line height of the font for the given size.
    /// The returned value is how much to vertically offset a second row of
    /// text below a first row of text.
    pub fn line_height(&self, size: f32) -> Px {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }
}

/// A store of parsed fonts, loaded lazily and cached by their absolute path
#[derive(Default)]
pub struct FontLibrary {
    fonts: Arena<Font>,
    by_path: HashMap<PathBuf, Id<Font>>,
}

impl FontLibrary {
    pub fn new() -> FontLibrary {
        FontLibrary::default()
    }

    /// Get the parsed font for `path`, reading and parsing it on first use
    pub fn load(&mut self, path: &Path) -> Result<&Font, RasterError> {
        if !self.by_path.contains_key(path) {
            let bytes = std::fs::read(path)?;
            let font = Font::load(bytes)?;
            let id = self.fonts.alloc(font);
            self.by_path.insert(path.to_path_buf(), id);
        }
        Ok(&self.fonts[self.by_path[path]])
    }
}

/// Maps short font file names to absolute paths under a configured fonts
/// directory. Injected into the renderer so callers control where fonts
/// live and how resolution failures surface.
#[derive(Debug, Clone)]
pub struct FontResolver {
    root: PathBuf,
}

impl FontResolver {
    /// Create a resolver rooted at the given fonts directory
    pub fn new<P: Into<PathBuf>>(root: P) -> FontResolver {
        FontResolver { root: root.into() }
    }

    /// Resolve a short font file name (e.g. `opensans-regular.ttf`) to an
    /// absolute path, failing with [RasterError::FontNotFound] if no such
    /// file exists under the root
    pub fn resolve(&self, name: &str) -> Result<PathBuf, RasterError> {
        let path = self.root.join(name);
        if path.is_file() {
            log::trace!("resolved font {name} to {}", path.display());
            Ok(path)
        } else {
            Err(RasterError::FontNotFound(path))
        }
    }
}
