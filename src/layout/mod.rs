// src/layout/mod.rs
pub mod content;
pub mod engine;
pub mod font;
pub mod page;
pub mod shaping;
pub mod unicode_font;
pub mod wrap;

pub use content::{ResumeContent, Section, SectionKind};
pub use engine::{render, RenderOptions, RenderedResume};
pub use font::StandardFont;
pub use page::{Color, DrawOp, Page, RasterImage, Rect};
pub use shaping::{RunFont, ShapedText, TextRun, TextShaper};
pub use unicode_font::UnicodeFont;
pub use wrap::wrap_text;
