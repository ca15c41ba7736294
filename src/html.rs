// src/html.rs
//! Static HTML version of the resume, following the same section order as the PDF.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::layout::content::{
    contact_line, education_line, experience_paragraph, project_paragraph, ResumeContent,
    SectionKind,
};
use crate::layout::engine::{FOOTER_PREFIX, TIMESTAMP_FORMAT};
use crate::layout::page::Color;
use crate::template_system::{PRIMARY, SECONDARY, TEXT};
use crate::types::profile::non_blank;
use crate::types::ResumeProfile;

/// Stylesheet in the shared template palette
fn stylesheet() -> String {
    let rule = SECONDARY.lerp(Color::WHITE, 0.85);
    let chip = PRIMARY.lerp(Color::WHITE, 0.85);
    format!(
        "\
body {{ font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; color: {text}; }}
h1 {{ color: {primary}; margin-bottom: 5px; }}
h2 {{ color: {primary}; border-bottom: 2px solid {rule}; padding-bottom: 5px; }}
.contact {{ color: {secondary}; margin-bottom: 20px; }}
.skills {{ display: flex; flex-wrap: wrap; gap: 8px; }}
.skill {{ background: {chip}; padding: 4px 8px; border-radius: 4px; font-size: 14px; }}
.footer {{ font-size: 12px; color: {secondary}; }}
",
        text = TEXT.to_hex(),
        primary = PRIMARY.to_hex(),
        secondary = SECONDARY.to_hex(),
        rule = rule.to_hex(),
        chip = chip.to_hex(),
    )
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn multiline(s: &str) -> String {
    s.lines().map(escape).collect::<Vec<_>>().join("<br>")
}

pub fn render_html(profile: &ResumeProfile, generated_at: DateTime<Local>) -> String {
    let content = ResumeContent::from_profile(profile);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html><head>\n<meta charset=\"UTF-8\">\n");
    let _ = writeln!(html, "<title>Resume - {}</title>", escape(&content.name));
    let _ = write!(html, "<style>\n{}</style>\n</head><body>\n", stylesheet());

    let _ = writeln!(html, "<h1>{}</h1>", escape(&content.name));
    if let Some(role) = &content.role {
        let _ = writeln!(html, "<p><strong>{}</strong></p>", escape(role));
    }

    let contact = contact_line(profile);
    if !contact.is_empty() {
        let _ = writeln!(html, "<div class=\"contact\">{}</div>", contact_html(profile));
    }

    for section in &content.sections {
        match section.kind {
            SectionKind::Objective => {
                html.push_str("<h2>Career Objective</h2>\n");
                let _ = writeln!(html, "<p>{}</p>", multiline(&section.body));
            }
            SectionKind::Skills => {
                html.push_str("<h2>Skills</h2>\n<div class=\"skills\">\n");
                for skill in profile
                    .technical_skills
                    .iter()
                    .chain(profile.soft_skills.iter())
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                {
                    let _ = writeln!(html, "<span class=\"skill\">{}</span>", escape(skill));
                }
                html.push_str("</div>\n");
            }
            SectionKind::Education => {
                html.push_str("<h2>Education</h2>\n");
                for line in profile.education.iter().filter_map(education_line) {
                    let _ = writeln!(html, "<p>{}</p>", escape(&line));
                }
            }
            SectionKind::Experience => {
                html.push_str("<h2>Experience</h2>\n");
                for entry in profile.experiences.iter().filter_map(experience_paragraph) {
                    let _ = writeln!(html, "<p>{}</p>", multiline(&entry));
                }
            }
            SectionKind::Projects => {
                html.push_str("<h2>Projects</h2>\n");
                for entry in profile.projects.iter().filter_map(project_paragraph) {
                    let _ = writeln!(html, "<p>{}</p>", multiline(&entry));
                }
            }
        }
    }

    let _ = writeln!(
        html,
        "<hr><p class=\"footer\">{} {}</p>",
        FOOTER_PREFIX,
        generated_at.format(TIMESTAMP_FORMAT)
    );
    html.push_str("</body></html>\n");
    html
}

/// Same fields and order as the PDF contact line, with the links made clickable.
fn contact_html(profile: &ResumeProfile) -> String {
    let mut parts = Vec::new();
    if let Some(email) = non_blank(&profile.email) {
        parts.push(format!("📧 {}", escape(email)));
    }
    if let Some(phone) = non_blank(&profile.phone) {
        parts.push(format!("📱 {}", escape(phone)));
    }
    if let Some(url) = non_blank(&profile.linkedin_url) {
        parts.push(format!("🔗 <a href=\"{}\">LinkedIn</a>", escape(url)));
    }
    if let Some(url) = non_blank(&profile.github_url) {
        parts.push(format!("🔗 <a href=\"{}\">GitHub</a>", escape(url)));
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EducationEntry;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_html_document_structure() {
        let mut p = ResumeProfile::new();
        p.full_name = Some("Asha Rao".into());
        p.email = Some("asha@x.com".into());
        p.technical_skills = vec!["Java".into(), "SQL".into()];
        p.add_education(EducationEntry::new("B.Tech", "IIT", "2024"));

        let html = render_html(&p, at());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Asha Rao</h1>"));
        assert!(html.contains("<div class=\"contact\">📧 asha@x.com</div>"));
        assert!(html.contains("<span class=\"skill\">SQL</span>"));
        assert!(html.contains("<p>B.Tech | IIT | 2024</p>"));
        assert!(!html.contains("<h2>Projects</h2>"));
        assert!(html.contains("Generated by Resume Builder on 05/03/2024 09:07"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut p = ResumeProfile::new();
        p.full_name = Some("<script>alert(1)</script>".into());
        p.objective = Some("R&D".into());
        let html = render_html(&p, at());
        assert!(!html.contains("<script>"));
        assert!(html.contains("R&amp;D"));
    }

    #[test]
    fn test_section_order_matches_pdf() {
        let mut p = ResumeProfile::new();
        p.objective = Some("Grow".into());
        p.technical_skills = vec!["Rust".into()];
        p.add_education(EducationEntry::new("BSc", "Uni", "2023"));
        let html = render_html(&p, at());
        let objective = html.find("Career Objective").unwrap();
        let skills = html.find("<h2>Skills").unwrap();
        let education = html.find("<h2>Education").unwrap();
        assert!(objective < skills && skills < education);
    }

    #[test]
    fn test_stylesheet_uses_template_palette() {
        let html = render_html(&ResumeProfile::new(), at());
        assert!(html.contains(&format!("h1 {{ color: {};", PRIMARY.to_hex())));
        assert!(html.contains(&format!("color: {}; }}", TEXT.to_hex())));
        assert!(html.contains(&format!(".contact {{ color: {};", SECONDARY.to_hex())));
    }
}
