// src/validation.rs
//! Input rules enforced by the wizard steps and the login form

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::types::ResumeProfile;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your full name")]
    EmptyFullName,

    #[error("Please enter your email address")]
    EmptyEmail,

    #[error("Please enter a valid email address: {0}")]
    InvalidEmail(String),

    #[error("Please add at least one education entry")]
    NoEducation,

    #[error("Please add at least one technical skill")]
    NoTechnicalSkill,

    #[error("Please write a career objective")]
    EmptyObjective,

    #[error("Please enter a username")]
    EmptyUsername,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("static email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn validate_email(email: Option<&str>) -> Result<(), ValidationError> {
    let email = email.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

pub fn validate_personal_info(profile: &ResumeProfile) -> Result<(), ValidationError> {
    if is_blank(&profile.full_name) {
        return Err(ValidationError::EmptyFullName);
    }
    validate_email(profile.email.as_deref())
}

pub fn validate_education(profile: &ResumeProfile) -> Result<(), ValidationError> {
    if profile.education.is_empty() {
        return Err(ValidationError::NoEducation);
    }
    Ok(())
}

pub fn validate_skills(profile: &ResumeProfile) -> Result<(), ValidationError> {
    if profile.technical_skills.is_empty() {
        return Err(ValidationError::NoTechnicalSkill);
    }
    Ok(())
}

pub fn validate_objective(profile: &ResumeProfile) -> Result<(), ValidationError> {
    if is_blank(&profile.objective) {
        return Err(ValidationError::EmptyObjective);
    }
    Ok(())
}

/// Login form rules. Registration additionally passes the confirmation field.
pub fn validate_credentials(
    username: &str,
    password: &str,
    confirm: Option<&str>,
) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if let Some(confirm) = confirm {
        if confirm != password {
            return Err(ValidationError::PasswordMismatch);
        }
    }
    Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EducationEntry;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("asha@x.com"));
        assert!(is_valid_email("first.last+cv@uni.edu"));
        assert!(!is_valid_email("asha.x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("asha@"));
        assert!(!is_valid_email("as ha@x.com"));
    }

    #[test]
    fn test_personal_info_rules() {
        let mut profile = ResumeProfile::new();
        assert_eq!(
            validate_personal_info(&profile),
            Err(ValidationError::EmptyFullName)
        );

        profile.full_name = Some("Asha Rao".into());
        assert_eq!(
            validate_personal_info(&profile),
            Err(ValidationError::EmptyEmail)
        );

        profile.email = Some("not-an-email".into());
        assert!(matches!(
            validate_personal_info(&profile),
            Err(ValidationError::InvalidEmail(_))
        ));

        profile.email = Some("asha@x.com".into());
        assert!(validate_personal_info(&profile).is_ok());
    }

    #[test]
    fn test_collection_rules() {
        let mut profile = ResumeProfile::new();
        assert_eq!(validate_education(&profile), Err(ValidationError::NoEducation));
        assert_eq!(
            validate_skills(&profile),
            Err(ValidationError::NoTechnicalSkill)
        );

        profile.add_education(EducationEntry::new("B.Tech", "IIT", "2024"));
        profile.add_technical_skill("Rust");
        assert!(validate_education(&profile).is_ok());
        assert!(validate_skills(&profile).is_ok());
    }

    #[test]
    fn test_whitespace_objective_is_empty() {
        let mut profile = ResumeProfile::new();
        profile.objective = Some("   ".into());
        assert_eq!(
            validate_objective(&profile),
            Err(ValidationError::EmptyObjective)
        );
    }

    #[test]
    fn test_credentials() {
        assert_eq!(
            validate_credentials("", "secret1", None),
            Err(ValidationError::EmptyUsername)
        );
        assert_eq!(
            validate_credentials("asha", "12345", None),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_credentials("asha", "123456", Some("123457")),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_credentials("asha", "123456", Some("123456")).is_ok());
    }
}
