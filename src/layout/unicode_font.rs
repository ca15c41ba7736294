// src/layout/unicode_font.rs
//! TrueType fallback for characters the base-14 fonts cannot encode.
//!
//! The font is embedded as a Type0/CIDFontType2 font with Identity-H encoding,
//! so content streams address it by glyph id.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use ttf_parser::{name_id, Face};

use crate::error::{ResumeError, ResumeResult};

/// Checked in order when no font is configured
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arialuni.ttf",
];

const SUBSET_TAG: &str = "RSMBLD";

pub struct UnicodeFont {
    path: PathBuf,
    data: Vec<u8>,
    postscript_name: String,
    units_per_em: f64,
    ascent: f64,
    descent: f64,
    cap_height: f64,
    bbox: [f64; 4],
}

impl fmt::Debug for UnicodeFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnicodeFont")
            .field("path", &self.path)
            .field("postscript_name", &self.postscript_name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl UnicodeFont {
    pub fn load(path: &Path) -> ResumeResult<Self> {
        let data = std::fs::read(path).map_err(|e| ResumeError::io(path, e))?;
        let font = Self::from_bytes(path, data)?;
        info!(
            "Loaded fallback font {} from {}",
            font.postscript_name,
            path.display()
        );
        Ok(font)
    }

    /// First readable font from [`SYSTEM_FONT_PATHS`]
    pub fn discover() -> Option<Self> {
        let found = SYSTEM_FONT_PATHS
            .iter()
            .map(Path::new)
            .filter(|path| path.exists())
            .find_map(|path| match Self::load(path) {
                Ok(font) => Some(font),
                Err(e) => {
                    debug!("Skipping fallback font {}: {}", path.display(), e);
                    None
                }
            });
        if found.is_none() {
            warn!("No Unicode fallback font found; non-Latin text will be dropped from PDFs");
        }
        found
    }

    fn from_bytes(path: &Path, data: Vec<u8>) -> ResumeResult<Self> {
        let (postscript_name, units_per_em, ascent, descent, cap_height, bbox) = {
            let face = Face::parse(&data, 0)
                .map_err(|e| ResumeError::Font(format!("{}: {}", path.display(), e)))?;

            let units_per_em = f64::from(face.units_per_em());
            let scale = 1000.0 / units_per_em;
            let ascent = f64::from(face.ascender()) * scale;
            let rect = face.global_bounding_box();
            let postscript_name = face
                .names()
                .into_iter()
                .find(|name| name.name_id == name_id::POST_SCRIPT_NAME)
                .and_then(|name| name.to_string())
                .unwrap_or_else(|| "UnicodeFallback".to_string());

            (
                postscript_name,
                units_per_em,
                ascent,
                f64::from(face.descender()) * scale,
                face.capital_height()
                    .map_or(ascent, |h| f64::from(h) * scale),
                [
                    f64::from(rect.x_min) * scale,
                    f64::from(rect.y_min) * scale,
                    f64::from(rect.x_max) * scale,
                    f64::from(rect.y_max) * scale,
                ],
            )
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
            postscript_name,
            units_per_em,
            ascent,
            descent,
            cap_height,
            bbox,
        })
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, 0).ok()
    }

    /// Glyph for `c`, ignoring `.notdef`
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face()?
            .glyph_index(c)
            .map(|gid| gid.0)
            .filter(|&gid| gid != 0)
    }

    pub fn covers(&self, c: char) -> bool {
        self.glyph_id(c).is_some()
    }

    /// Advance of `c` in thousandths of an em
    pub fn char_units(&self, c: char) -> Option<f64> {
        self.glyph_id(c).map(|gid| self.glyph_units(gid))
    }

    pub fn glyph_units(&self, gid: u16) -> f64 {
        self.face()
            .and_then(|face| face.glyph_hor_advance(ttf_parser::GlyphId(gid)))
            .map_or(0.0, |advance| f64::from(advance) * 1000.0 / self.units_per_em)
    }

    /// Subset tag plus a name-safe PostScript name
    pub fn base_font_name(&self) -> String {
        let clean: String = self
            .postscript_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        format!("{}+{}", SUBSET_TAG, clean)
    }

    /// Font program reduced to `glyphs`. Falls back to the whole file if subsetting fails.
    pub fn subset(&self, glyphs: &[u16]) -> Vec<u8> {
        match subsetter::subset(&self.data, 0, subsetter::Profile::pdf(glyphs)) {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    "Could not subset {}, embedding the full font: {}",
                    self.postscript_name, e
                );
                self.data.clone()
            }
        }
    }

    pub fn ascent(&self) -> f64 {
        self.ascent
    }

    pub fn descent(&self) -> f64 {
        self.descent
    }

    pub fn cap_height(&self) -> f64 {
        self.cap_height
    }

    pub fn bbox(&self) -> [f64; 4] {
        self.bbox
    }
}
