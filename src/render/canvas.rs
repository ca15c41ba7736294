// src/render/canvas.rs
//! Thin drawing wrapper over a pdf-writer content stream.
//!
//! Callers pass top-left page coordinates; the canvas flips them into PDF user
//! space, whose origin is the bottom-left corner.

use pdf_writer::{Content, Name, Str};

use crate::layout::font::{encode_winansi, StandardFont};
use crate::layout::page::{Color, Rect};

pub struct PdfCanvas {
    content: Content,
    page_height: f64,
}

impl PdfCanvas {
    pub fn new(page_height: f64) -> Self {
        Self {
            content: Content::new(),
            page_height,
        }
    }

    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    fn flip_y(&self, y: f64) -> f32 {
        (self.page_height - y) as f32
    }

    // ===== Colors =====

    pub fn set_fill_color(&mut self, color: Color) {
        let (r, g, b) = color.to_unit();
        self.content.set_fill_rgb(r, g, b);
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        let (r, g, b) = color.to_unit();
        self.content.set_stroke_rgb(r, g, b);
    }

    // ===== Shapes =====

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        let bottom = self.flip_y(rect.y + rect.height);
        self.content
            .rect(rect.x as f32, bottom, rect.width as f32, rect.height as f32);
        self.content.fill_nonzero();
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.set_stroke_color(color);
        self.content.set_line_width(line_width as f32);
        let bottom = self.flip_y(rect.y + rect.height);
        self.content
            .rect(rect.x as f32, bottom, rect.width as f32, rect.height as f32);
        self.content.stroke();
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, line_width: f64) {
        self.set_stroke_color(color);
        self.content.set_line_width(line_width as f32);
        let (y1, y2) = (self.flip_y(from.1), self.flip_y(to.1));
        self.content.move_to(from.0 as f32, y1);
        self.content.line_to(to.0 as f32, y2);
        self.content.stroke();
    }

    // ===== Text =====

    /// Draw one line of text with its baseline at `y`.
    pub fn draw_string(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        font: StandardFont,
        size: f64,
        color: Color,
    ) {
        let encoded = encode_winansi(text);
        if encoded.is_empty() {
            return;
        }

        self.set_fill_color(color);
        let baseline = self.flip_y(y);
        self.content.begin_text();
        self.content.set_font(font.resource_name(), size as f32);
        self.content.next_line(x as f32, baseline);
        self.content.show(Str(&encoded));
        self.content.end_text();
    }

    /// Draw glyph ids through a two-byte Identity-H font registered under `font`.
    pub fn draw_glyphs(
        &mut self,
        x: f64,
        y: f64,
        glyphs: &[u16],
        font: Name<'_>,
        size: f64,
        color: Color,
    ) {
        if glyphs.is_empty() {
            return;
        }

        let encoded: Vec<u8> = glyphs.iter().flat_map(|gid| gid.to_be_bytes()).collect();
        self.set_fill_color(color);
        let baseline = self.flip_y(y);
        self.content.begin_text();
        self.content.set_font(font, size as f32);
        self.content.next_line(x as f32, baseline);
        self.content.show(Str(&encoded));
        self.content.end_text();
    }

    // ===== Images =====

    /// Paint an image XObject, already registered under `name`, scaled into `rect`.
    pub fn draw_image(&mut self, name: Name<'_>, rect: Rect) {
        let bottom = self.flip_y(rect.y + rect.height);
        self.content.save_state();
        self.content.transform([
            rect.width as f32,
            0.0,
            0.0,
            rect.height as f32,
            rect.x as f32,
            bottom,
        ]);
        self.content.x_object(name);
        self.content.restore_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(canvas: PdfCanvas) -> String {
        String::from_utf8_lossy(&canvas.finish()).into_owned()
    }

    #[test]
    fn test_rect_is_flipped_to_bottom_left() {
        let mut canvas = PdfCanvas::new(842.0);
        canvas.fill_rect(Rect::new(0.0, 0.0, 595.0, 120.0), Color::WHITE);
        let out = stream(canvas);
        assert!(out.contains("0 722 595 120 re"), "{out}");
        assert!(out.contains('f'));
    }

    #[test]
    fn test_text_is_encoded_and_positioned() {
        let mut canvas = PdfCanvas::new(842.0);
        canvas.draw_string(50.0, 45.0, "ASHA", StandardFont::HelveticaBold, 28.0, Color::WHITE);
        let out = stream(canvas);
        assert!(out.contains("/F2 28 Tf"), "{out}");
        assert!(out.contains("50 797 Td"), "{out}");
        assert!(out.contains("(ASHA) Tj"), "{out}");
    }

    #[test]
    fn test_unencodable_text_draws_nothing() {
        let mut canvas = PdfCanvas::new(842.0);
        canvas.draw_string(50.0, 45.0, "🎯", StandardFont::Helvetica, 12.0, Color::WHITE);
        assert!(!stream(canvas).contains("Tj"));
    }

    #[test]
    fn test_glyphs_use_the_named_font() {
        let mut canvas = PdfCanvas::new(842.0);
        canvas.draw_glyphs(50.0, 45.0, &[0x0041, 0x0042], Name(b"F5"), 24.0, Color::WHITE);
        let out = stream(canvas);
        assert!(out.contains("/F5 24 Tf"), "{out}");
        assert!(out.contains("Tj"), "{out}");
    }

    #[test]
    fn test_no_glyphs_draws_nothing() {
        let mut canvas = PdfCanvas::new(842.0);
        canvas.draw_glyphs(50.0, 45.0, &[], Name(b"F5"), 24.0, Color::WHITE);
        assert!(!stream(canvas).contains("Tj"));
    }
}
