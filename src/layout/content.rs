// src/layout/content.rs
//! Text the templates draw, derived from a profile. Shared by the PDF and HTML outputs.

use crate::types::profile::non_blank;
use crate::types::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeProfile};

pub const NAME_PLACEHOLDER: &str = "YOUR NAME";
const CONTACT_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Objective,
    Skills,
    Education,
    Experience,
    Projects,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeContent {
    pub name: String,
    pub role: Option<String>,
    pub contact: Option<String>,
    pub sections: Vec<Section>,
}

impl ResumeContent {
    pub fn from_profile(profile: &ResumeProfile) -> Self {
        let candidates = [
            (SectionKind::Objective, non_blank(&profile.objective).map(str::to_string)),
            (SectionKind::Skills, skills_body(profile)),
            (SectionKind::Education, education_body(&profile.education)),
            (SectionKind::Experience, experience_body(&profile.experiences)),
            (SectionKind::Projects, projects_body(&profile.projects)),
        ];

        let sections = candidates
            .into_iter()
            .filter_map(|(kind, body)| body.map(|body| Section { kind, body }))
            .collect();

        let contact = contact_line(profile);

        Self {
            name: non_blank(&profile.full_name)
                .unwrap_or(NAME_PLACEHOLDER)
                .to_string(),
            role: non_blank(&profile.selected_role).map(str::to_string),
            contact: (!contact.is_empty()).then_some(contact),
            sections,
        }
    }
}

/// Email, phone and profile links, each with its label, joined by `" | "`.
pub fn contact_line(profile: &ResumeProfile) -> String {
    let mut parts = Vec::new();
    if let Some(email) = non_blank(&profile.email) {
        parts.push(format!("📧 {}", email));
    }
    if let Some(phone) = non_blank(&profile.phone) {
        parts.push(format!("📱 {}", phone));
    }
    if non_blank(&profile.linkedin_url).is_some() {
        parts.push("🔗 LinkedIn".to_string());
    }
    if non_blank(&profile.github_url).is_some() {
        parts.push("🔗 GitHub".to_string());
    }
    parts.join(CONTACT_SEPARATOR)
}

pub fn skills_body(profile: &ResumeProfile) -> Option<String> {
    let technical = joined_skills(&profile.technical_skills);
    let soft = joined_skills(&profile.soft_skills);

    let mut lines = Vec::new();
    if let Some(technical) = technical {
        lines.push(format!("Technical: {}", technical));
    }
    if let Some(soft) = soft {
        lines.push(format!("Soft Skills: {}", soft));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn joined_skills(skills: &[String]) -> Option<String> {
    let kept: Vec<&str> = skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    (!kept.is_empty()).then(|| kept.join(", "))
}

pub fn education_line(entry: &EducationEntry) -> Option<String> {
    let grade = non_blank(&entry.grade).map(|g| format!("Grade: {}", g));
    let parts: Vec<String> = [
        non_blank(&entry.degree).map(str::to_string),
        non_blank(&entry.institution).map(str::to_string),
        non_blank(&entry.location).map(str::to_string),
        non_blank(&entry.year).map(str::to_string),
        grade,
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(" | "))
}

pub fn education_body(entries: &[EducationEntry]) -> Option<String> {
    join_entries(entries.iter().filter_map(education_line))
}

pub fn experience_paragraph(entry: &ExperienceEntry) -> Option<String> {
    let headline = match (non_blank(&entry.position), non_blank(&entry.company)) {
        (Some(position), Some(company)) => Some(format!("{} at {}", position, company)),
        (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
        (None, None) => None,
    };
    let header: Vec<&str> = [
        headline.as_deref(),
        non_blank(&entry.duration),
        non_blank(&entry.location),
    ]
    .into_iter()
    .flatten()
    .collect();

    paragraph(&header, non_blank(&entry.description), None)
}

pub fn experience_body(entries: &[ExperienceEntry]) -> Option<String> {
    join_entries(entries.iter().filter_map(experience_paragraph))
}

pub fn project_paragraph(entry: &ProjectEntry) -> Option<String> {
    let header: Vec<&str> = [
        non_blank(&entry.title),
        non_blank(&entry.technologies),
        non_blank(&entry.duration),
    ]
    .into_iter()
    .flatten()
    .collect();

    let links: Vec<String> = [
        non_blank(&entry.github_url).map(|u| format!("Code: {}", u)),
        non_blank(&entry.live_url).map(|u| format!("Live: {}", u)),
    ]
    .into_iter()
    .flatten()
    .collect();
    let links = (!links.is_empty()).then(|| links.join(" | "));

    paragraph(&header, non_blank(&entry.description), links.as_deref())
}

pub fn projects_body(entries: &[ProjectEntry]) -> Option<String> {
    join_entries(entries.iter().filter_map(project_paragraph))
}

fn paragraph(header: &[&str], description: Option<&str>, footer: Option<&str>) -> Option<String> {
    let header = (!header.is_empty()).then(|| header.join(" | "));
    let lines: Vec<&str> = [header.as_deref(), description, footer]
        .into_iter()
        .flatten()
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn join_entries(entries: impl Iterator<Item = String>) -> Option<String> {
    let entries: Vec<String> = entries.collect();
    (!entries.is_empty()).then(|| entries.join("\n"))
}
