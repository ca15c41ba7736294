// src/layout/engine.rs
//! One layout routine for every template. The template's style record decides
//! the header treatment, fonts, colors and spacing; the section skeleton is shared.

use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use super::content::ResumeContent;
use super::font::StandardFont;
use super::page::{Color, Page, RasterImage, Rect, PAGE_HEIGHT, PAGE_WIDTH};
use super::shaping::TextShaper;
use super::wrap::wrap_text;
use crate::error::ResumeResult;
use crate::template_system::{HeaderStyle, TemplateId, TemplateStyle};
use crate::types::ResumeProfile;

pub const MARGIN: f64 = 50.0;
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
pub const QR_SIZE: f64 = 60.0;
pub const QR_PLACEHOLDER_TEXT: &str = "QR CODE";
pub const FOOTER_PREFIX: &str = "Generated by Resume Builder on";
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

const LINE_SPACING: f64 = 1.2;
const GRADIENT_STRIPS: usize = 50;
const BANNER_NAME_Y: f64 = 45.0;
const BANNER_ROLE_Y: f64 = 70.0;
const STACKED_NAME_Y: f64 = MARGIN + 20.0;
const RULE_STEP: f64 = 10.0;
const FOOTER_SIZE: f64 = 8.0;
const FOOTER_Y: f64 = PAGE_HEIGHT - 20.0;

/// Inputs that are not part of the profile. Fixing `generated_at` makes output reproducible.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub generated_at: DateTime<Local>,
    /// Measures text and picks the font for each run
    pub shaper: TextShaper,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::at(Local::now())
    }
}

impl RenderOptions {
    pub fn at(generated_at: DateTime<Local>) -> Self {
        Self {
            generated_at,
            shaper: TextShaper::system(),
        }
    }

    pub fn with_shaper(mut self, shaper: TextShaper) -> Self {
        self.shaper = shaper;
        self
    }

    pub fn footer_text(&self) -> String {
        format!(
            "{} {}",
            FOOTER_PREFIX,
            self.generated_at.format(TIMESTAMP_FORMAT)
        )
    }
}

#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub template: TemplateId,
    pub title: String,
    pub page: Page,
    /// Set when the sections ran past the bottom margin
    pub overflowed: bool,
    /// Whether the QR image was drawn, as opposed to the placeholder box
    pub qr_embedded: bool,
    pub shaper: TextShaper,
}

impl RenderedResume {
    pub fn to_pdf(&self) -> ResumeResult<Vec<u8>> {
        crate::render::pdf::write_pdf(&self.page, &self.title, &self.shaper)
    }
}

/// Where the QR box sits for a template, in top-left page coordinates.
pub fn qr_rect(style: &TemplateStyle) -> Rect {
    Rect::new(
        PAGE_WIDTH - MARGIN - style.qr_inset,
        PAGE_HEIGHT - MARGIN - style.qr_inset,
        QR_SIZE,
        QR_SIZE,
    )
}

pub fn render(
    profile: &ResumeProfile,
    template: TemplateId,
    qr_image: Option<&Path>,
    options: &RenderOptions,
) -> RenderedResume {
    let style = template.style();
    let content = ResumeContent::from_profile(profile);

    let mut layout = Layout {
        page: Page::new(),
        style,
        shaper: &options.shaper,
        y: 0.0,
    };

    layout.header(&content);
    for section in &content.sections {
        layout.section(style.titles.for_kind(section.kind), &section.body);
    }

    let overflowed = layout.y > PAGE_HEIGHT - MARGIN;
    if overflowed {
        warn!(
            "Resume content for template {} runs past the page ({:.0}pt)",
            template, layout.y
        );
    }

    let qr_embedded = layout.qr_box(qr_image);
    layout.footer(options);

    debug!(
        "Laid out {} sections, {} draw ops for template {}",
        content.sections.len(),
        layout.page.ops.len(),
        template
    );

    RenderedResume {
        template,
        title: format!("Resume - {}", content.name),
        page: layout.page,
        overflowed,
        qr_embedded,
        shaper: options.shaper.clone(),
    }
}

struct Layout<'a> {
    page: Page,
    style: TemplateStyle,
    shaper: &'a TextShaper,
    y: f64,
}

impl Layout<'_> {
    fn regular(&self) -> StandardFont {
        self.style.fonts.regular
    }

    fn bold(&self) -> StandardFont {
        self.style.fonts.bold
    }

    fn header(&mut self, content: &ResumeContent) {
        let palette = self.style.palette;
        let name = self.style.format_name(&content.name);
        let role = content.role.as_deref().map(|r| self.style.format_role(r));

        match self.style.header {
            HeaderStyle::Band { height, contact_y } => {
                self.page
                    .fill_rect(Rect::new(0.0, 0.0, PAGE_WIDTH, height), palette.accent);
                self.banner_text(&name, role.as_deref(), content.contact.as_deref(), contact_y);
                self.y = height + 20.0;
            }
            HeaderStyle::Gradient {
                height,
                end,
                contact_y,
            } => {
                let strip = PAGE_WIDTH / GRADIENT_STRIPS as f64;
                for i in 0..GRADIENT_STRIPS {
                    let t = i as f64 / (GRADIENT_STRIPS - 1) as f64;
                    // Slight overlap so strips leave no hairline seams
                    self.page.fill_rect(
                        Rect::new(i as f64 * strip, 0.0, strip + 0.5, height),
                        palette.accent.lerp(end, t),
                    );
                }
                self.banner_text(&name, role.as_deref(), content.contact.as_deref(), contact_y);
                self.y = height + 20.0;
            }
            HeaderStyle::Centered => {
                let (regular, bold) = (self.regular(), self.bold());
                let style = self.style;
                self.y = STACKED_NAME_Y;
                self.centered(&name, bold, style.name_size, palette.text);
                self.y += 30.0;
                if let Some(role) = role.as_deref() {
                    self.centered(role, regular, style.role_size, palette.secondary);
                    self.y += 22.0;
                }
                if let Some(contact) = content.contact.as_deref() {
                    self.centered(contact, regular, style.contact_size, palette.text);
                }
                self.y += 40.0;
                self.page.line(
                    (MARGIN, self.y),
                    (PAGE_WIDTH - MARGIN, self.y),
                    palette.secondary,
                    1.0,
                );
                self.y += 30.0;
            }
            HeaderStyle::Ruled => {
                let (regular, bold) = (self.regular(), self.bold());
                let style = self.style;
                self.y = STACKED_NAME_Y;
                self.page
                    .text(MARGIN, self.y, &name, bold, style.name_size, palette.text);
                self.y += 10.0;
                if let Some(role) = role.as_deref() {
                    self.page
                        .text(MARGIN, self.y, role, regular, style.role_size, palette.text);
                    self.y += 20.0;
                }
                if let Some(contact) = content.contact.as_deref() {
                    self.page
                        .text(MARGIN, self.y, contact, regular, style.contact_size, palette.text);
                    self.y += 20.0;
                }
                let steps = (CONTENT_WIDTH / RULE_STEP) as usize;
                for i in 0..steps {
                    let x = MARGIN + i as f64 * RULE_STEP;
                    self.page
                        .text(x, self.y, "=", regular, style.role_size, palette.secondary);
                }
                self.y += 30.0;
            }
        }
    }

    fn banner_text(&mut self, name: &str, role: Option<&str>, contact: Option<&str>, contact_y: f64) {
        let (regular, bold) = (self.regular(), self.bold());
        self.page.text(
            MARGIN,
            BANNER_NAME_Y,
            name,
            bold,
            self.style.name_size,
            Color::WHITE,
        );
        if let Some(role) = role {
            self.page
                .text(MARGIN, BANNER_ROLE_Y, role, regular, self.style.role_size, Color::WHITE);
        }
        if let Some(contact) = contact {
            self.page
                .text(MARGIN, contact_y, contact, regular, self.style.contact_size, Color::WHITE);
        }
    }

    fn centered(&mut self, text: &str, font: StandardFont, size: f64, color: Color) {
        let x = (PAGE_WIDTH - self.shaper.width(text, font, size)) / 2.0;
        self.page.text(x, self.y, text, font, size, color);
    }

    fn section(&mut self, title: &str, body: &str) {
        let section = self.style.section;
        let palette = self.style.palette;
        let title_color = if section.title_accent {
            palette.accent
        } else {
            palette.text
        };

        let bold = self.bold();
        self.page
            .text(MARGIN, self.y, title, bold, section.title_size, title_color);
        self.y += section.title_gap;

        if let Some(underline) = section.underline {
            self.page.line(
                (MARGIN, self.y),
                (MARGIN + underline.width, self.y),
                palette.accent,
                1.0,
            );
            self.y += underline.gap;
        }

        let regular = self.regular();
        self.paragraphs(body, regular, section.body_size, palette.text);
        self.y += section.after_gap;
    }

    fn paragraphs(&mut self, text: &str, font: StandardFont, size: f64, color: Color) {
        let line_height = size * LINE_SPACING;
        for line in wrap_text(text, self.shaper, font, size, CONTENT_WIDTH) {
            if !line.is_empty() {
                self.page.text(MARGIN, self.y, &line, font, size, color);
            }
            self.y += line_height;
        }
    }

    /// Draw the QR image into its box, or the placeholder when there is none to draw.
    fn qr_box(&mut self, qr_image: Option<&Path>) -> bool {
        let rect = qr_rect(&self.style);

        if let Some(path) = qr_image {
            match image::open(path) {
                Ok(decoded) => {
                    self.page.image(rect, RasterImage::from_dynamic(&decoded));
                    return true;
                }
                Err(e) => warn!(
                    "QR image {} could not be loaded, drawing placeholder: {}",
                    path.display(),
                    e
                ),
            }
        }

        let palette = self.style.palette;
        self.page.fill_rect(rect, palette.light);
        self.page.stroke_rect(rect, palette.text, 1.0);
        self.page.text(
            rect.x + 15.0,
            rect.y + 30.0,
            QR_PLACEHOLDER_TEXT,
            StandardFont::Helvetica,
            8.0,
            palette.text,
        );
        false
    }

    fn footer(&mut self, options: &RenderOptions) {
        let footer = options.footer_text();
        let font = StandardFont::Helvetica;
        let x = (PAGE_WIDTH - self.shaper.width(&footer, font, FOOTER_SIZE)) / 2.0;
        self.page
            .text(x, FOOTER_Y, &footer, font, FOOTER_SIZE, self.style.palette.secondary);
    }
}
