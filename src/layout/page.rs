// src/layout/page.rs
//! Page display list. Coordinates are in points from the top-left corner;
//! text `y` is the baseline. The PDF writer flips them into PDF user space.

use image::DynamicImage;

use super::font::StandardFont;

pub const PAGE_WIDTH: f64 = 595.0;
pub const PAGE_HEIGHT: f64 = 842.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_rgb8(255, 255, 255);

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend, `t` clamped to 0..=1.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::from_rgb8(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Decoded image ready to embed: 8-bit RGB samples plus an optional alpha plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl RasterImage {
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            let pixels = rgba.into_raw();
            let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
            let mut alpha = Vec::with_capacity(pixels.len() / 4);
            for px in pixels.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
                alpha.push(px[3]);
            }
            Self {
                width,
                height,
                rgb,
                alpha: Some(alpha),
            }
        } else {
            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            Self {
                width,
                height,
                rgb: rgb.into_raw(),
                alpha: None,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
        line_width: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font: StandardFont,
        size: f64,
        color: Color,
    },
    Image {
        rect: Rect,
        image: RasterImage,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            ops: Vec::new(),
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, line_width: f64) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            line_width,
        });
    }

    pub fn text(&mut self, x: f64, y: f64, text: &str, font: StandardFont, size: f64, color: Color) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font,
            size,
            color,
        });
    }

    pub fn image(&mut self, rect: Rect, image: RasterImage) {
        self.ops.push(DrawOp::Image { rect, image });
    }

    /// Drawn strings in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn fonts_used(&self) -> Vec<StandardFont> {
        StandardFont::ALL
            .into_iter()
            .filter(|f| {
                self.ops
                    .iter()
                    .any(|op| matches!(op, DrawOp::Text { font, .. } if font == f))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_color_lerp_endpoints() {
        let a = Color::from_rgb8(37, 99, 235);
        let b = Color::from_rgb8(147, 51, 234);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::from_rgb8(92, 75, 235));
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::from_rgb8(37, 99, 235).to_hex(), "#2563EB");
    }

    #[test]
    fn test_raster_splits_alpha() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        img.put_pixel(1, 0, Rgba([5, 6, 7, 8]));
        let raster = RasterImage::from_dynamic(&DynamicImage::ImageRgba8(img));
        assert_eq!(raster.rgb, vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(raster.alpha, Some(vec![4, 8]));
    }

    #[test]
    fn test_fonts_used_in_canonical_order() {
        let mut page = Page::new();
        page.text(0.0, 0.0, "b", StandardFont::Courier, 10.0, Color::WHITE);
        page.text(0.0, 0.0, "a", StandardFont::Helvetica, 10.0, Color::WHITE);
        assert_eq!(
            page.fonts_used(),
            vec![StandardFont::Helvetica, StandardFont::Courier]
        );
    }
}
