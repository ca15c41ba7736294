// src/render/pdf.rs
//! Serialise a laid-out page into a single-page PDF.
//!
//! Object numbering follows paint order and nothing time-dependent is written,
//! so the same page always produces the same bytes.

use std::collections::BTreeMap;

use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Finish, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};
use tracing::{debug, warn};

use super::canvas::PdfCanvas;
use crate::error::{ResumeError, ResumeResult};
use crate::layout::font::StandardFont;
use crate::layout::page::{Color, DrawOp, Page, RasterImage};
use crate::layout::shaping::{RunFont, TextShaper};
use crate::layout::unicode_font::UnicodeFont;

const PRODUCER: &str = "Resume Builder";
const UNICODE_FONT_NAME: Name<'static> = Name(b"F5");
const IDENTITY_INFO: SystemInfo<'static> = SystemInfo {
    registry: Str(b"Adobe"),
    ordering: Str(b"Identity"),
    supplement: 0,
};

struct RefAllocator(i32);

impl RefAllocator {
    fn next(&mut self) -> Ref {
        let id = Ref::new(self.0);
        self.0 += 1;
        id
    }
}

struct EmbeddedImage<'a> {
    name: String,
    id: Ref,
    mask_id: Option<Ref>,
    image: &'a RasterImage,
}

/// Glyphs drawn through the fallback font, keyed by glyph id
struct EmbeddedFont<'a> {
    id: Ref,
    font: &'a UnicodeFont,
    glyphs: BTreeMap<u16, char>,
}

/// Text op state while drawing runs, shared by every op on the page
struct TextPainter<'a> {
    shaper: &'a TextShaper,
    unicode: Option<EmbeddedFont<'a>>,
    dropped: Vec<char>,
}

impl<'a> TextPainter<'a> {
    #[allow(clippy::too_many_arguments)]
    fn draw(
        &mut self,
        canvas: &mut PdfCanvas,
        refs: &mut RefAllocator,
        (x, y): (f64, f64),
        text: &str,
        font: StandardFont,
        size: f64,
        color: Color,
    ) {
        let shaper: &'a TextShaper = self.shaper;
        let shaped = shaper.shape(text, font, size);
        for c in shaped.dropped {
            if !self.dropped.contains(&c) {
                self.dropped.push(c);
            }
        }

        let mut pen = x;
        for run in &shaped.runs {
            match run.font {
                RunFont::Standard(standard) => {
                    canvas.draw_string(pen, y, &run.text, standard, size, color)
                }
                RunFont::Unicode => {
                    let Some(unicode) = shaper.unicode_font() else {
                        continue;
                    };
                    let embedded = self.unicode.get_or_insert_with(|| EmbeddedFont {
                        id: refs.next(),
                        font: unicode,
                        glyphs: BTreeMap::new(),
                    });
                    let glyphs: Vec<u16> = run
                        .text
                        .chars()
                        .filter_map(|c| {
                            let gid = unicode.glyph_id(c)?;
                            embedded.glyphs.entry(gid).or_insert(c);
                            Some(gid)
                        })
                        .collect();
                    canvas.draw_glyphs(pen, y, &glyphs, UNICODE_FONT_NAME, size, color);
                }
            }
            pen += run.width;
        }
    }
}

pub fn write_pdf(page: &Page, title: &str, shaper: &TextShaper) -> ResumeResult<Vec<u8>> {
    let mut refs = RefAllocator(1);
    let catalog_id = refs.next();
    let tree_id = refs.next();
    let page_id = refs.next();
    let content_id = refs.next();
    let info_id = refs.next();

    // The footer always draws in Helvetica, so the list is never empty in practice.
    let mut fonts = page.fonts_used();
    if fonts.is_empty() {
        fonts.push(StandardFont::Helvetica);
    }
    let font_refs: Vec<(StandardFont, Ref)> = fonts.into_iter().map(|f| (f, refs.next())).collect();

    let mut images: Vec<EmbeddedImage> = Vec::new();
    let mut canvas = PdfCanvas::new(page.height);
    let mut painter = TextPainter {
        shaper,
        unicode: None,
        dropped: Vec::new(),
    };

    for op in &page.ops {
        match op {
            DrawOp::FillRect { rect, color } => canvas.fill_rect(*rect, *color),
            DrawOp::StrokeRect {
                rect,
                color,
                line_width,
            } => canvas.stroke_rect(*rect, *color, *line_width),
            DrawOp::Line {
                from,
                to,
                color,
                line_width,
            } => canvas.line(*from, *to, *color, *line_width),
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
                color,
            } => painter.draw(&mut canvas, &mut refs, (*x, *y), text, *font, *size, *color),
            DrawOp::Image { rect, image } => {
                check_samples(image)?;
                let embedded = EmbeddedImage {
                    name: format!("Im{}", images.len() + 1),
                    id: refs.next(),
                    mask_id: image.alpha.as_ref().map(|_| refs.next()),
                    image,
                };
                canvas.draw_image(Name(embedded.name.as_bytes()), *rect);
                images.push(embedded);
            }
        }
    }

    if !painter.dropped.is_empty() {
        let missing: String = painter.dropped.iter().collect();
        warn!(
            "{} character(s) have no glyph in any available font and were left out of \"{}\": {}",
            painter.dropped.len(),
            title,
            missing
        );
    }

    let content = canvas.finish();
    let mut pdf = Pdf::new();

    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id).kids([page_id]).count(1);

    {
        let mut pdf_page = pdf.page(page_id);
        pdf_page.media_box(PdfRect::new(0.0, 0.0, page.width as f32, page.height as f32));
        pdf_page.parent(tree_id);
        pdf_page.contents(content_id);

        let mut resources = pdf_page.resources();
        {
            let mut font_dict = resources.fonts();
            for (font, id) in &font_refs {
                font_dict.pair(font.resource_name(), *id);
            }
            if let Some(unicode) = &painter.unicode {
                font_dict.pair(UNICODE_FONT_NAME, unicode.id);
            }
            font_dict.finish();
        }
        if !images.is_empty() {
            let mut xobjects = resources.x_objects();
            for embedded in &images {
                xobjects.pair(Name(embedded.name.as_bytes()), embedded.id);
            }
            xobjects.finish();
        }
        resources.finish();
        pdf_page.finish();
    }

    pdf.stream(content_id, &content);

    for (font, id) in &font_refs {
        pdf.type1_font(*id)
            .base_font(font.base_font())
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    if let Some(unicode) = &painter.unicode {
        write_unicode_font(&mut pdf, &mut refs, unicode);
    }

    for embedded in &images {
        write_image(&mut pdf, embedded);
    }

    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(PRODUCER));

    let bytes = pdf.finish();
    debug!(
        "PDF written: {} bytes, {} fonts, {} images",
        bytes.len(),
        font_refs.len() + usize::from(painter.unicode.is_some()),
        images.len()
    );
    Ok(bytes)
}

/// Type0 font over a subset TrueType program, with a ToUnicode map so text stays extractable.
fn write_unicode_font(pdf: &mut Pdf, refs: &mut RefAllocator, embedded: &EmbeddedFont) {
    let cid_id = refs.next();
    let descriptor_id = refs.next();
    let file_id = refs.next();
    let cmap_id = refs.next();

    let font = embedded.font;
    let base_font = font.base_font_name();
    let glyph_ids: Vec<u16> = embedded.glyphs.keys().copied().collect();

    pdf.type0_font(embedded.id)
        .base_font(Name(base_font.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_id)
        .to_unicode(cmap_id);

    {
        let mut cid = pdf.cid_font(cid_id);
        cid.subtype(CidFontType::Type2);
        cid.base_font(Name(base_font.as_bytes()));
        cid.system_info(IDENTITY_INFO);
        cid.font_descriptor(descriptor_id);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        {
            let mut widths = cid.widths();
            for &gid in &glyph_ids {
                widths.consecutive(gid, [font.glyph_units(gid) as f32]);
            }
        }
        cid.finish();
    }

    let [x_min, y_min, x_max, y_max] = font.bbox();
    pdf.font_descriptor(descriptor_id)
        .name(Name(base_font.as_bytes()))
        .flags(FontFlags::NON_SYMBOLIC)
        .bbox(PdfRect::new(
            x_min as f32,
            y_min as f32,
            x_max as f32,
            y_max as f32,
        ))
        .italic_angle(0.0)
        .ascent(font.ascent() as f32)
        .descent(font.descent() as f32)
        .cap_height(font.cap_height() as f32)
        .stem_v(80.0)
        .font_file2(file_id);

    let program = font.subset(&glyph_ids);
    pdf.stream(file_id, &program)
        .pair(Name(b"Length1"), program.len() as i32);

    let mut cmap = UnicodeCmap::new(Name(b"Custom"), IDENTITY_INFO);
    for (&gid, &c) in &embedded.glyphs {
        cmap.pair(gid, c);
    }
    pdf.cmap(cmap_id, &cmap.finish());

    debug!(
        "Embedded {} with {} glyphs ({} bytes)",
        base_font,
        glyph_ids.len(),
        program.len()
    );
}

fn check_samples(image: &RasterImage) -> ResumeResult<()> {
    let pixels = image.width as usize * image.height as usize;
    if pixels == 0 || image.rgb.len() != pixels * 3 {
        return Err(ResumeError::Pdf(format!(
            "image sample buffer does not match {}x{} RGB",
            image.width, image.height
        )));
    }
    if let Some(alpha) = &image.alpha {
        if alpha.len() != pixels {
            return Err(ResumeError::Pdf(format!(
                "alpha buffer does not match {}x{}",
                image.width, image.height
            )));
        }
    }
    Ok(())
}

fn write_image(pdf: &mut Pdf, embedded: &EmbeddedImage) {
    let image = embedded.image;

    if let (Some(mask_id), Some(alpha)) = (embedded.mask_id, image.alpha.as_ref()) {
        let mut mask = pdf.image_xobject(mask_id, alpha);
        mask.width(image.width as i32);
        mask.height(image.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
    }

    let mut xobject = pdf.image_xobject(embedded.id, &image.rgb);
    xobject.width(image.width as i32);
    xobject.height(image.height as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if let Some(mask_id) = embedded.mask_id {
        xobject.s_mask(mask_id);
    }
}
