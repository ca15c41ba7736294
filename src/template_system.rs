// src/template_system.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResumeError;
use crate::layout::content::SectionKind;
use crate::layout::font::StandardFont;
use crate::layout::page::Color;

pub const PRIMARY: Color = Color::from_rgb8(37, 99, 235);
pub const SECONDARY: Color = Color::from_rgb8(71, 85, 105);
pub const TEXT: Color = Color::from_rgb8(30, 41, 59);
pub const LIGHT_GRAY: Color = Color::from_rgb8(248, 250, 252);
pub const GRADIENT_END: Color = Color::from_rgb8(147, 51, 234);

/// The four visual layouts a resume can be exported with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Modern,
    Clean,
    Creative,
    Technical,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Modern,
        TemplateId::Clean,
        TemplateId::Creative,
        TemplateId::Technical,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Clean => "clean",
            Self::Creative => "creative",
            Self::Technical => "technical",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Modern => "Modern Professional",
            Self::Clean => "Clean & Simple",
            Self::Creative => "Creative",
            Self::Technical => "Technical",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Modern => "Blue header band with underlined section titles",
            Self::Clean => "Centered header, divider rule, understated sections",
            Self::Creative => "Gradient header band with icon section titles",
            Self::Technical => "Monospace layout with an ASCII rule under the header",
        }
    }

    pub fn style(&self) -> TemplateStyle {
        match self {
            Self::Modern => TemplateStyle {
                id: *self,
                palette: Palette::default(),
                fonts: FontPair::HELVETICA,
                header: HeaderStyle::Band {
                    height: 120.0,
                    contact_y: 95.0,
                },
                name_case: NameCase::Upper,
                name_prefix: "",
                name_size: 28.0,
                role_size: 16.0,
                contact_size: 12.0,
                section: SectionStyle {
                    title_size: 14.0,
                    title_accent: true,
                    title_gap: 20.0,
                    underline: Some(Underline {
                        width: 100.0,
                        gap: 15.0,
                    }),
                    body_size: 11.0,
                    after_gap: 20.0,
                },
                titles: SectionTitles {
                    objective: "CAREER OBJECTIVE",
                    skills: "SKILLS",
                    education: "EDUCATION",
                    experience: "EXPERIENCE",
                    projects: "PROJECTS",
                },
                qr_inset: 80.0,
            },
            Self::Clean => TemplateStyle {
                id: *self,
                palette: Palette::default(),
                fonts: FontPair::HELVETICA,
                header: HeaderStyle::Centered,
                name_case: NameCase::AsEntered,
                name_prefix: "",
                name_size: 24.0,
                role_size: 14.0,
                contact_size: 12.0,
                section: SectionStyle {
                    title_size: 12.0,
                    title_accent: false,
                    title_gap: 15.0,
                    underline: None,
                    body_size: 11.0,
                    after_gap: 15.0,
                },
                titles: SectionTitles {
                    objective: "OBJECTIVE",
                    skills: "SKILLS",
                    education: "EDUCATION",
                    experience: "EXPERIENCE",
                    projects: "PROJECTS",
                },
                qr_inset: 60.0,
            },
            Self::Creative => TemplateStyle {
                id: *self,
                palette: Palette::default(),
                fonts: FontPair::HELVETICA,
                header: HeaderStyle::Gradient {
                    height: 100.0,
                    end: GRADIENT_END,
                    contact_y: 90.0,
                },
                name_case: NameCase::AsEntered,
                name_prefix: "🎯 ",
                name_size: 26.0,
                role_size: 14.0,
                contact_size: 11.0,
                section: SectionStyle {
                    title_size: 13.0,
                    title_accent: true,
                    title_gap: 18.0,
                    underline: None,
                    body_size: 11.0,
                    after_gap: 18.0,
                },
                titles: SectionTitles {
                    objective: "💡 OBJECTIVE",
                    skills: "⚡ SKILLS",
                    education: "🎓 EDUCATION",
                    experience: "💼 EXPERIENCE",
                    projects: "🚀 PROJECTS",
                },
                qr_inset: 70.0,
            },
            Self::Technical => TemplateStyle {
                id: *self,
                palette: Palette::default(),
                fonts: FontPair::COURIER,
                header: HeaderStyle::Ruled,
                name_case: NameCase::Upper,
                name_prefix: "",
                name_size: 20.0,
                role_size: 14.0,
                contact_size: 10.0,
                section: SectionStyle {
                    title_size: 12.0,
                    title_accent: false,
                    title_gap: 15.0,
                    underline: None,
                    body_size: 10.0,
                    after_gap: 15.0,
                },
                titles: SectionTitles {
                    objective: "OBJECTIVE",
                    skills: "TECHNICAL SKILLS",
                    education: "EDUCATION",
                    experience: "EXPERIENCE",
                    projects: "PROJECTS",
                },
                qr_inset: 60.0,
            },
        }
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::Modern
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TemplateId {
    type Err = ResumeError;

    /// Accepts the slug, the display name, or the legacy `templateN` identifiers
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requested = s.trim().to_lowercase();
        match requested.as_str() {
            "modern" | "modern professional" | "template1" => Ok(Self::Modern),
            "clean" | "clean & simple" | "clean-simple" | "template2" => Ok(Self::Clean),
            "creative" | "template3" => Ok(Self::Creative),
            "technical" | "template4" => Ok(Self::Technical),
            _ => Err(ResumeError::UnknownTemplate(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Color,
    pub secondary: Color,
    pub text: Color,
    pub light: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: PRIMARY,
            secondary: SECONDARY,
            text: TEXT,
            light: LIGHT_GRAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontPair {
    pub regular: StandardFont,
    pub bold: StandardFont,
}

impl FontPair {
    pub const HELVETICA: FontPair = FontPair {
        regular: StandardFont::Helvetica,
        bold: StandardFont::HelveticaBold,
    };
    pub const COURIER: FontPair = FontPair {
        regular: StandardFont::Courier,
        bold: StandardFont::CourierBold,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderStyle {
    /// Solid accent band across the top of the page
    Band { height: f64, contact_y: f64 },
    /// Centered name and contact, divider rule underneath
    Centered,
    /// Left-to-right gradient band from the accent color to `end`
    Gradient {
        height: f64,
        end: Color,
        contact_y: f64,
    },
    /// Monospace name followed by a row of `=`
    Ruled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCase {
    Upper,
    AsEntered,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Underline {
    pub width: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionStyle {
    pub title_size: f64,
    pub title_accent: bool,
    pub title_gap: f64,
    pub underline: Option<Underline>,
    pub body_size: f64,
    pub after_gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTitles {
    pub objective: &'static str,
    pub skills: &'static str,
    pub education: &'static str,
    pub experience: &'static str,
    pub projects: &'static str,
}

impl SectionTitles {
    pub fn for_kind(&self, kind: SectionKind) -> &'static str {
        match kind {
            SectionKind::Objective => self.objective,
            SectionKind::Skills => self.skills,
            SectionKind::Education => self.education,
            SectionKind::Experience => self.experience,
            SectionKind::Projects => self.projects,
        }
    }
}

/// Everything that differs between templates; the section skeleton itself is shared
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateStyle {
    pub id: TemplateId,
    pub palette: Palette,
    pub fonts: FontPair,
    pub header: HeaderStyle,
    pub name_case: NameCase,
    pub name_prefix: &'static str,
    pub name_size: f64,
    pub role_size: f64,
    pub contact_size: f64,
    pub section: SectionStyle,
    pub titles: SectionTitles,
    /// Distance of the QR box's top-left corner from the bottom-right margin corner
    pub qr_inset: f64,
}

impl TemplateStyle {
    pub fn format_name(&self, name: &str) -> String {
        let name = match self.name_case {
            NameCase::Upper => name.to_uppercase(),
            NameCase::AsEntered => name.to_string(),
        };
        format!("{}{}", self.name_prefix, name)
    }

    pub fn format_role(&self, role: &str) -> String {
        // Technical shouts the role as well
        match self.header {
            HeaderStyle::Ruled => role.to_uppercase(),
            _ => role.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_from_str() {
        assert_eq!("modern".parse::<TemplateId>().unwrap(), TemplateId::Modern);
        assert_eq!("Template2".parse::<TemplateId>().unwrap(), TemplateId::Clean);
        assert_eq!(" CREATIVE ".parse::<TemplateId>().unwrap(), TemplateId::Creative);
        assert_eq!("template4".parse::<TemplateId>().unwrap(), TemplateId::Technical);
        assert!("fancy".parse::<TemplateId>().is_err());
    }

    #[test]
    fn test_slug_round_trips_through_from_str() {
        for id in TemplateId::ALL {
            assert_eq!(id.slug().parse::<TemplateId>().unwrap(), id);
        }
    }

    #[test]
    fn test_name_formatting_per_template() {
        assert_eq!(TemplateId::Modern.style().format_name("Asha Rao"), "ASHA RAO");
        assert_eq!(TemplateId::Clean.style().format_name("Asha Rao"), "Asha Rao");
        assert_eq!(TemplateId::Creative.style().format_name("Asha Rao"), "🎯 Asha Rao");
        assert_eq!(
            TemplateId::Technical.style().format_role("Data Analyst"),
            "DATA ANALYST"
        );
    }

    #[test]
    fn test_technical_uses_courier() {
        let style = TemplateId::Technical.style();
        assert_eq!(style.fonts.regular, StandardFont::Courier);
        assert_eq!(style.fonts.bold, StandardFont::CourierBold);
    }
}
