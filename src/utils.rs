// src/utils.rs
use chrono::NaiveDate;

use crate::error::{ResumeError, ResumeResult};
use crate::types::profile::non_blank;
use crate::types::ResumeProfile;

const FALLBACK_STEM: &str = "resume";

/// Replace every character that is not an ASCII letter or digit with `_`
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `Asha_Rao_20240305`, or `resume_20240305` when the profile has no name
pub fn default_file_stem(profile: &ResumeProfile, date: NaiveDate) -> String {
    let name = non_blank(&profile.full_name)
        .map(sanitize_file_stem)
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    format!("{}_{}", name, date.format("%Y%m%d"))
}

/// Append `.ext` unless the name already ends with it (case-insensitive)
pub fn ensure_extension(file_name: &str, ext: &str) -> String {
    let suffix = format!(".{}", ext.to_lowercase());
    if file_name.to_lowercase().ends_with(&suffix) {
        file_name.to_string()
    } else {
        format!("{}{}", file_name, suffix)
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> ResumeResult<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| ResumeError::Parse(format!("File has no extension: {}", filename)))?;

    if !allowed.contains(&ext.as_str()) {
        return Err(ResumeError::Parse(format!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext, allowed
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Asha Rao"), "Asha_Rao");
        assert_eq!(sanitize_file_stem("Jean-Paul O'Neil"), "Jean_Paul_O_Neil");
        assert_eq!(sanitize_file_stem("Zoë"), "Zo_");
    }

    #[test]
    fn test_default_file_stem() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut profile = ResumeProfile::new();
        assert_eq!(default_file_stem(&profile, date), "resume_20240305");

        profile.full_name = Some("Asha Rao".into());
        assert_eq!(default_file_stem(&profile, date), "Asha_Rao_20240305");
    }

    #[test]
    fn test_ensure_extension() {
        assert_eq!(ensure_extension("cv", "pdf"), "cv.pdf");
        assert_eq!(ensure_extension("cv.PDF", "pdf"), "cv.PDF");
        assert_eq!(ensure_extension("cv.pdf", "html"), "cv.pdf.html");
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("profile.json"), Some("json".to_string()));
        assert_eq!(get_file_extension("profile.YAML"), Some("yaml".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("qr.png", &["png", "jpg"]).is_ok());
        assert!(validate_file_extension("qr.gif", &["png", "jpg"]).is_err());
        assert!(validate_file_extension("noext", &["png"]).is_err());
    }
}
