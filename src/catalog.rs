// src/catalog.rs
//! Career role catalog: loaded from a JSON resource, with a built-in fallback

use std::path::Path;

use tracing::{info, warn};

use crate::core::FsOps;
use crate::types::{ResumeProfile, RoleCatalogFile, RoleRecord};

pub const DEFAULT_CATALOG_PATH: &str = "resources/role_data.json";

const OBJECTIVE_SUFFIX: &str =
    " Passionate about leveraging technology to solve real-world problems and create meaningful impact.";

#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<RoleRecord>,
}

impl RoleCatalog {
    /// Load the catalog at `path`. A missing file, malformed JSON or an empty
    /// role list falls back to the built-in catalog.
    pub fn load(path: &Path) -> Self {
        let content = match FsOps::read_file_safe(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Role catalog unavailable ({}), using built-in roles", e);
                return Self::builtin();
            }
        };

        match serde_json::from_str::<RoleCatalogFile>(&content) {
            Ok(file) if !file.roles.is_empty() => {
                info!("Loaded {} roles from {}", file.roles.len(), path.display());
                Self { roles: file.roles }
            }
            Ok(_) => {
                warn!(
                    "Role catalog {} has no roles, using built-in roles",
                    path.display()
                );
                Self::builtin()
            }
            Err(e) => {
                warn!(
                    "Invalid role catalog {}: {}, using built-in roles",
                    path.display(),
                    e
                );
                Self::builtin()
            }
        }
    }

    pub fn builtin() -> Self {
        Self {
            roles: vec![
                role(
                    "software_developer",
                    "Software Developer",
                    "💻",
                    "Build applications, websites, and software solutions",
                    &["Java", "Python", "JavaScript", "React", "Node.js", "SQL", "Git"],
                    &[
                        "Highlight coding projects with GitHub links",
                        "Show technical skills with specific technologies",
                    ],
                    &["E-commerce Website", "Task Management App", "Weather App"],
                    "Aspiring Software Developer with strong programming fundamentals seeking to contribute to innovative projects.",
                ),
                role(
                    "data_analyst",
                    "Data Analyst",
                    "📊",
                    "Analyze data to derive insights and support decision-making",
                    &["Python", "R", "SQL", "Tableau", "Excel", "Statistics", "Machine Learning"],
                    &[
                        "Quantify analysis results with specific metrics",
                        "Show visualization skills",
                    ],
                    &["Sales Analysis Dashboard", "Customer Behavior Study", "Market Trend Analysis"],
                    "Detail-oriented Data Analyst passionate about transforming raw data into actionable insights.",
                ),
                role(
                    "digital_marketer",
                    "Digital Marketer",
                    "📱",
                    "Create and manage digital marketing campaigns",
                    &["Social Media", "SEO", "Google Analytics", "Content Marketing", "Email Marketing"],
                    &["Show campaign results with metrics", "Highlight social media growth"],
                    &["Social Media Campaign", "SEO Strategy", "Email Newsletter"],
                    "Creative Digital Marketer passionate about driving brand growth through innovative online strategies.",
                ),
                role(
                    "business_analyst",
                    "Business Analyst",
                    "📈",
                    "Bridge business needs with technology solutions",
                    &["Requirements Analysis", "Process Mapping", "SQL", "Excel", "Business Intelligence"],
                    &[
                        "Show process improvements with metrics",
                        "Highlight stakeholder management",
                    ],
                    &["Process Optimization", "Requirements Documentation", "Business Intelligence Dashboard"],
                    "Analytical Business Analyst focused on optimizing processes and driving business value through data-driven insights.",
                ),
                role(
                    "ux_designer",
                    "UI/UX Designer",
                    "🎨",
                    "Design user-friendly interfaces and experiences",
                    &["Figma", "Adobe XD", "Prototyping", "User Research", "Wireframing", "Design Systems"],
                    &[
                        "Create a strong portfolio",
                        "Show design thinking process",
                        "Include user research insights",
                    ],
                    &["Mobile App Design", "Website Redesign", "Design System", "User Experience Study"],
                    "Creative UI/UX Designer passionate about crafting intuitive user experiences through thoughtful design and user research.",
                ),
            ],
        }
    }

    pub fn roles(&self) -> &[RoleRecord] {
        &self.roles
    }

    pub fn find(&self, id: &str) -> Option<&RoleRecord> {
        self.roles.iter().find(|r| r.id == id)
    }
}

#[allow(clippy::too_many_arguments)]
fn role(
    id: &str,
    name: &str,
    icon: &str,
    description: &str,
    skills: &[&str],
    tips: &[&str],
    projects: &[&str],
    objective_template: &str,
) -> RoleRecord {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    RoleRecord {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        skills: owned(skills),
        tips: owned(tips),
        projects: owned(projects),
        objective_template: objective_template.to_string(),
    }
}

/// Record the chosen role on the profile. A blank objective is seeded from the role's template.
pub fn apply_role(profile: &mut ResumeProfile, role: &RoleRecord) {
    profile.selected_role = Some(role.name.clone());
    let objective_blank = profile
        .objective
        .as_deref()
        .map_or(true, |o| o.trim().is_empty());
    if objective_blank && !role.objective_template.trim().is_empty() {
        profile.objective = Some(role.objective_template.clone());
    }
    profile.touch();
    info!("Role selected: {}", role.name);
}

pub fn suggest_objective(role: &RoleRecord) -> String {
    if role.objective_template.trim().is_empty() {
        format!(
            "Motivated {} with strong foundational skills seeking to contribute to innovative \
             projects while continuously learning and growing in a dynamic environment.",
            role.name
        )
    } else {
        format!("{}{}", role.objective_template, OBJECTIVE_SUFFIX)
    }
}

/// Role skills the profile does not list yet, compared case-insensitively.
pub fn suggested_skills<'a>(role: &'a RoleRecord, profile: &ResumeProfile) -> Vec<&'a str> {
    role.skills
        .iter()
        .filter(|skill| {
            !profile
                .technical_skills
                .iter()
                .chain(profile.soft_skills.iter())
                .any(|have| have.trim().eq_ignore_ascii_case(skill.trim()))
        })
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builtin_has_five_roles() {
        let catalog = RoleCatalog::builtin();
        let ids: Vec<&str> = catalog.roles().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "software_developer",
                "data_analyst",
                "digital_marketer",
                "business_analyst",
                "ux_designer"
            ]
        );
    }

    #[test]
    fn test_missing_file_falls_back() {
        let catalog = RoleCatalog::load(Path::new("/nonexistent/role_data.json"));
        assert_eq!(catalog.roles().len(), 5);
    }

    #[test]
    fn test_malformed_and_empty_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ roles: [").unwrap();
        assert!(RoleCatalog::load(&bad).find("data_analyst").is_some());

        let empty = dir.path().join("empty.json");
        fs::write(&empty, r#"{"roles": []}"#).unwrap();
        assert_eq!(RoleCatalog::load(&empty).roles().len(), 5);
    }

    #[test]
    fn test_load_custom_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.json");
        fs::write(
            &path,
            r#"{"roles": [{"id": "qa", "name": "QA Engineer", "skills": ["Selenium"]}]}"#,
        )
        .unwrap();
        let catalog = RoleCatalog::load(&path);
        assert_eq!(catalog.roles().len(), 1);
        let qa = catalog.find("qa").unwrap();
        assert_eq!(qa.skills, vec!["Selenium"]);
        assert!(qa.tips.is_empty());
    }

    #[test]
    fn test_apply_role_seeds_blank_objective_only() {
        let catalog = RoleCatalog::builtin();
        let dev = catalog.find("software_developer").unwrap();

        let mut profile = ResumeProfile::new();
        apply_role(&mut profile, dev);
        assert_eq!(profile.selected_role.as_deref(), Some("Software Developer"));
        assert_eq!(
            profile.objective.as_deref(),
            Some(dev.objective_template.as_str())
        );

        profile.objective = Some("My own words".into());
        apply_role(&mut profile, catalog.find("data_analyst").unwrap());
        assert_eq!(profile.selected_role.as_deref(), Some("Data Analyst"));
        assert_eq!(profile.objective.as_deref(), Some("My own words"));
    }

    #[test]
    fn test_suggest_objective() {
        let catalog = RoleCatalog::builtin();
        let analyst = catalog.find("data_analyst").unwrap();
        assert!(suggest_objective(analyst).ends_with("create meaningful impact."));

        let mut bare = analyst.clone();
        bare.objective_template.clear();
        assert!(suggest_objective(&bare).starts_with("Motivated Data Analyst with"));
    }

    #[test]
    fn test_suggested_skills_skip_existing() {
        let catalog = RoleCatalog::builtin();
        let dev = catalog.find("software_developer").unwrap();
        let mut profile = ResumeProfile::new();
        profile.technical_skills = vec!["java".into(), "SQL".into()];
        let suggested = suggested_skills(dev, &profile);
        assert!(!suggested.contains(&"Java"));
        assert!(!suggested.contains(&"SQL"));
        assert!(suggested.contains(&"Git"));
    }
}
