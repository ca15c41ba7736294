// src/layout/shaping.rs
//! Splits a line of text into runs the PDF can draw: base-14 runs for what
//! WinAnsi encodes, fallback-font runs for everything else the fallback covers.
//!
//! Contact and section icons without a glyph are replaced by a word label or
//! removed together with the space after them. Any other character without a
//! glyph is reported in [`ShapedText::dropped`].

use std::sync::{Arc, OnceLock};

use super::font::{to_winansi, StandardFont};
use super::unicode_font::UnicodeFont;

/// Icons that carry meaning get a word instead
const ICON_LABELS: &[(char, &str)] = &[('📧', "Email:"), ('📱', "Phone:")];

/// Decorative icons, removed silently
const DECORATIVE: &[char] = &[
    '🔗', '🎯', '💡', '⚡', '🎓', '💼', '🚀', '\u{FE0F}', '\u{200D}',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunFont {
    Standard(StandardFont),
    Unicode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub font: RunFont,
    pub text: String,
    /// Advance in points at the shaped size
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedText {
    pub runs: Vec<TextRun>,
    pub dropped: Vec<char>,
}

impl ShapedText {
    pub fn width(&self) -> f64 {
        self.runs.iter().map(|run| run.width).sum()
    }

    fn push(&mut self, font: RunFont, c: char, width: f64) {
        match self.runs.last_mut() {
            Some(run) if run.font == font => {
                run.text.push(c);
                run.width += width;
            }
            _ => self.runs.push(TextRun {
                font,
                text: c.to_string(),
                width,
            }),
        }
    }

    fn last_char(&self) -> Option<char> {
        self.runs.last().and_then(|run| run.text.chars().last())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextShaper {
    unicode: Option<Arc<UnicodeFont>>,
}

impl TextShaper {
    pub fn new(unicode: Option<Arc<UnicodeFont>>) -> Self {
        Self { unicode }
    }

    /// Shaper backed by the first installed system fallback font, looked up once per process.
    pub fn system() -> Self {
        static SYSTEM: OnceLock<Option<Arc<UnicodeFont>>> = OnceLock::new();
        Self {
            unicode: SYSTEM
                .get_or_init(|| UnicodeFont::discover().map(Arc::new))
                .clone(),
        }
    }

    pub fn unicode_font(&self) -> Option<&UnicodeFont> {
        self.unicode.as_deref()
    }

    pub fn shape(&self, text: &str, font: StandardFont, size: f64) -> ShapedText {
        let mut shaped = ShapedText::default();
        let mut skip_space = false;

        for c in text.chars() {
            if std::mem::take(&mut skip_space) && c == ' ' {
                continue;
            }

            if to_winansi(c).is_some() {
                let units = f64::from(font.char_units(c));
                shaped.push(RunFont::Standard(font), c, units * size / 1000.0);
                continue;
            }

            if let Some(units) = self.unicode.as_ref().and_then(|f| f.char_units(c)) {
                shaped.push(RunFont::Unicode, c, units * size / 1000.0);
                continue;
            }

            match ICON_LABELS.iter().find(|(icon, _)| *icon == c) {
                Some((_, label)) => {
                    for lc in label.chars() {
                        let units = f64::from(font.char_units(lc));
                        shaped.push(RunFont::Standard(font), lc, units * size / 1000.0);
                    }
                }
                None => {
                    if !DECORATIVE.contains(&c) {
                        shaped.dropped.push(c);
                    }
                    skip_space = shaped.last_char().map_or(true, |last| last == ' ');
                }
            }
        }

        shaped
    }

    pub fn width(&self, text: &str, font: StandardFont, size: f64) -> f64 {
        self.shape(text, font, size).width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: StandardFont = StandardFont::Helvetica;

    fn drawn(shaped: &ShapedText) -> String {
        shaped.runs.iter().map(|run| run.text.as_str()).collect()
    }

    #[test]
    fn test_latin_text_is_one_standard_run() {
        let shaped = TextShaper::default().shape("Café Asha", FONT, 12.0);
        assert_eq!(shaped.runs.len(), 1);
        assert_eq!(shaped.runs[0].font, RunFont::Standard(FONT));
        assert!((shaped.width() - FONT.text_width("Café Asha", 12.0)).abs() < 1e-9);
        assert!(shaped.dropped.is_empty());
    }

    #[test]
    fn test_contact_icons_become_labels() {
        let shaped = TextShaper::default().shape(
            "📧 asha@x.com | 📱 +91 98765 | 🔗 LinkedIn | 🔗 GitHub",
            FONT,
            12.0,
        );
        assert_eq!(
            drawn(&shaped),
            "Email: asha@x.com | Phone: +91 98765 | LinkedIn | GitHub"
        );
        assert!(shaped.dropped.is_empty());
    }

    #[test]
    fn test_decorative_prefix_leaves_no_leading_space() {
        let shaper = TextShaper::default();
        assert_eq!(drawn(&shaper.shape("🎯 Asha Rao", FONT, 26.0)), "Asha Rao");
        assert_eq!(drawn(&shaper.shape("💡 OBJECTIVE", FONT, 13.0)), "OBJECTIVE");
    }

    #[test]
    fn test_uncovered_script_is_reported() {
        let shaped = TextShaper::default().shape("आशा राव", FONT, 24.0);
        assert!(shaped.runs.is_empty());
        assert_eq!(shaped.dropped.len(), "आशाराव".chars().count());
    }

    #[test]
    fn test_fallback_font_takes_non_latin_runs() {
        let Some(font) = UnicodeFont::discover() else {
            return;
        };
        let name = "Ольга Петрова";
        if !name.chars().filter(|c| *c != ' ').all(|c| font.covers(c)) {
            return;
        }

        let shaped = TextShaper::new(Some(Arc::new(font))).shape(name, FONT, 24.0);
        assert!(shaped.dropped.is_empty());
        assert_eq!(drawn(&shaped), name);
        let fonts: Vec<RunFont> = shaped.runs.iter().map(|r| r.font).collect();
        assert_eq!(
            fonts,
            vec![RunFont::Unicode, RunFont::Standard(FONT), RunFont::Unicode]
        );
        assert!(shaped.width() > 0.0);
    }
}
