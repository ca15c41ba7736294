// src/types/profile.rs
//! Resume profile: the single in-memory aggregate a session edits and the renderer reads

use std::path::Path;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ResumeError, ResumeResult};
use crate::template_system::TemplateId;

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

// ===== Nested entries =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub grade: Option<String>,
    pub location: Option<String>,
}

impl EducationEntry {
    pub fn new(degree: &str, institution: &str, year: &str) -> Self {
        Self {
            degree: Some(degree.to_string()),
            institution: Some(institution.to_string()),
            year: Some(year.to_string()),
            ..Default::default()
        }
    }

    pub fn with_grade(mut self, grade: &str) -> Self {
        self.grade = Some(grade.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<String>,
    pub duration: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
}

impl ProjectEntry {
    pub fn new(title: &str, description: &str, technologies: &str, duration: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            technologies: Some(technologies.to_string()),
            duration: Some(duration.to_string()),
            ..Default::default()
        }
    }

    pub fn with_links(mut self, github_url: Option<&str>, live_url: Option<&str>) -> Self {
        self.github_url = github_url.map(str::to_string);
        self.live_url = live_url.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub position: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl ExperienceEntry {
    pub fn new(
        company: &str,
        position: &str,
        duration: &str,
        location: &str,
        description: &str,
    ) -> Self {
        Self {
            company: Some(company.to_string()),
            position: Some(position.to_string()),
            duration: Some(duration.to_string()),
            location: Some(location.to_string()),
            description: Some(description.to_string()),
        }
    }
}

// ===== Profile =====

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,

    pub selected_role: Option<String>,
    pub objective: Option<String>,
    pub summary: Option<String>,

    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub experiences: Vec<ExperienceEntry>,
    pub achievements: Vec<String>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub template_selected: Option<TemplateId>,
}

impl Default for ResumeProfile {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            full_name: None,
            email: None,
            phone: None,
            address: None,
            linkedin_url: None,
            github_url: None,
            portfolio_url: None,
            selected_role: None,
            objective: None,
            summary: None,
            technical_skills: Vec::new(),
            soft_skills: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            experiences: Vec::new(),
            achievements: Vec::new(),
            certifications: Vec::new(),
            languages: Vec::new(),
            created_at: now,
            last_modified: now,
            template_selected: None,
        }
    }
}

impl ResumeProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the profile was edited.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    pub fn formatted_created_at(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string()
    }

    pub fn formatted_last_modified(&self) -> String {
        self.last_modified
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string()
    }

    pub fn set_personal_info(&mut self, full_name: &str, email: &str, phone: Option<&str>) {
        self.full_name = Some(full_name.to_string());
        self.email = Some(email.to_string());
        self.phone = phone.map(str::to_string);
        self.touch();
    }

    pub fn set_objective(&mut self, objective: &str) {
        self.objective = Some(objective.to_string());
        self.touch();
    }

    pub fn add_technical_skill(&mut self, skill: &str) {
        self.technical_skills.push(skill.to_string());
        self.touch();
    }

    pub fn add_soft_skill(&mut self, skill: &str) {
        self.soft_skills.push(skill.to_string());
        self.touch();
    }

    pub fn remove_technical_skill(&mut self, skill: &str) -> bool {
        let removed = remove_first(&mut self.technical_skills, |s| s == skill);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn remove_soft_skill(&mut self, skill: &str) -> bool {
        let removed = remove_first(&mut self.soft_skills, |s| s == skill);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn add_education(&mut self, entry: EducationEntry) {
        self.education.push(entry);
        self.touch();
    }

    pub fn remove_education(&mut self, index: usize) -> Option<EducationEntry> {
        let removed = (index < self.education.len()).then(|| self.education.remove(index));
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn add_project(&mut self, entry: ProjectEntry) {
        self.projects.push(entry);
        self.touch();
    }

    pub fn remove_project(&mut self, index: usize) -> Option<ProjectEntry> {
        let removed = (index < self.projects.len()).then(|| self.projects.remove(index));
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn add_experience(&mut self, entry: ExperienceEntry) {
        self.experiences.push(entry);
        self.touch();
    }

    pub fn remove_experience(&mut self, index: usize) -> Option<ExperienceEntry> {
        let removed = (index < self.experiences.len()).then(|| self.experiences.remove(index));
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Load a profile from a JSON, YAML or TOML file, chosen by extension
    pub fn from_file(path: &Path) -> ResumeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ResumeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = crate::utils::get_file_extension(&path.to_string_lossy());
        let profile = match ext.as_deref() {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ResumeError::Parse(format!("{}: {}", path.display(), e)))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| ResumeError::Parse(format!("{}: {}", path.display(), e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| ResumeError::Parse(format!("{}: {}", path.display(), e)))?,
            other => {
                return Err(ResumeError::Parse(format!(
                    "Unsupported profile format: {} (use .json, .yaml or .toml)",
                    other.unwrap_or("none")
                )))
            }
        };

        Ok(profile)
    }

    pub fn to_yaml(&self) -> ResumeResult<String> {
        serde_yaml::to_string(self).map_err(|e| ResumeError::Parse(e.to_string()))
    }
}

fn remove_first<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    match items.iter().position(pred) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

/// Trimmed, non-empty view of an optional field.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_has_empty_collections() {
        let profile = ResumeProfile::new();
        assert!(profile.technical_skills.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.languages.is_empty());
        assert_eq!(profile.created_at, profile.last_modified);
    }

    #[test]
    fn test_mutators_touch_last_modified() {
        let mut profile = ResumeProfile::new();
        let before = profile.last_modified;
        std::thread::sleep(std::time::Duration::from_millis(2));
        profile.add_technical_skill("Rust");
        assert!(profile.last_modified > before);
        assert_eq!(profile.created_at, before);
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let mut profile = ResumeProfile::new();
        profile.add_technical_skill("SQL");
        profile.add_technical_skill("Java");
        profile.add_technical_skill("SQL");
        assert_eq!(profile.technical_skills, vec!["SQL", "Java", "SQL"]);
        assert!(profile.remove_technical_skill("SQL"));
        assert_eq!(profile.technical_skills, vec!["Java", "SQL"]);
    }

    #[test]
    fn test_remove_out_of_range_is_none() {
        let mut profile = ResumeProfile::new();
        assert!(profile.remove_education(0).is_none());
    }

    #[test]
    fn test_missing_collections_deserialize_empty() {
        let profile: ResumeProfile =
            serde_json::from_str(r#"{"full_name": "Asha Rao", "email": "asha@x.com"}"#).unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Asha Rao"));
        assert!(profile.projects.is_empty());
        assert!(profile.soft_skills.is_empty());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  x ".to_string())), Some("x"));
        assert_eq!(non_blank(&Some("   ".to_string())), None);
        assert_eq!(non_blank(&None), None);
    }
}
