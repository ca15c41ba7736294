// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::qr::DEFAULT_QR_PX;
use crate::template_system::TemplateId;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub output_path: PathBuf,
    pub qr_path: PathBuf,
    pub role_catalog_path: PathBuf,
    pub default_template: TemplateId,
    pub include_qr: bool,
    /// Raster side of the QR PNG in pixels
    pub qr_px: u32,
    /// TrueType font for text outside WinAnsi. Unset means search the system fonts.
    pub unicode_font: Option<PathBuf>,
    /// JSON log file written alongside the console output
    pub log_file: Option<PathBuf>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output"),
            qr_path: PathBuf::from("resources/assets/qr"),
            role_catalog_path: PathBuf::from(crate::catalog::DEFAULT_CATALOG_PATH),
            default_template: TemplateId::Modern,
            include_qr: true,
            qr_px: DEFAULT_QR_PX,
            unicode_font: None,
            log_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration for the current environment. Without a config file the defaults apply.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            if config_path.is_some() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            warn!("{} not found, using default configuration", path.display());
            return Self::default().resolved();
        }

        info!(
            "Loading configuration for environment {} from {}",
            environment,
            path.display()
        );
        Self::load_from_file(&path, &environment)
    }

    fn get_environment() -> String {
        std::env::var("RESUME_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let config_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&config_content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))?
            .resolved()
    }

    fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    /// Make relative paths absolute against the working directory
    fn resolved(self) -> Result<Self> {
        Ok(Self {
            output_path: Self::resolve_path(&self.output_path)?,
            qr_path: Self::resolve_path(&self.qr_path)?,
            role_catalog_path: Self::resolve_path(&self.role_catalog_path)?,
            unicode_font: self
                .unicode_font
                .as_deref()
                .map(Self::resolve_path)
                .transpose()?,
            log_file: self
                .log_file
                .as_deref()
                .map(Self::resolve_path)
                .transpose()?,
            ..self
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  output_path: out
  default_template: clean
production:
  output_path: /srv/resumes
  qr_path: /srv/resumes/qr
  include_qr: false
  qr_px: 300
  unicode_font: /usr/share/fonts/noto/NotoSans-Regular.ttf
  log_file: /var/log/resume-builder.json
"#;

    #[test]
    fn test_environment_sections() {
        let local = EnvironmentConfig::from_yaml(SAMPLE, "local").unwrap();
        assert_eq!(local.output_path, PathBuf::from("out"));
        assert_eq!(local.default_template, TemplateId::Clean);
        assert!(local.include_qr);
        assert_eq!(local.qr_path, PathBuf::from("resources/assets/qr"));

        let production = EnvironmentConfig::from_yaml(SAMPLE, "production").unwrap();
        assert_eq!(production.output_path, PathBuf::from("/srv/resumes"));
        assert!(!production.include_qr);
        assert_eq!(production.default_template, TemplateId::Modern);
        assert_eq!(production.qr_px, 300);
        assert_eq!(
            production.unicode_font,
            Some(PathBuf::from("/usr/share/fonts/noto/NotoSans-Regular.ttf"))
        );
        assert_eq!(local.qr_px, DEFAULT_QR_PX);
        assert!(local.unicode_font.is_none());
    }

    #[test]
    fn test_unknown_environment_uses_local() {
        let config = EnvironmentConfig::from_yaml(SAMPLE, "staging").unwrap();
        assert_eq!(config.output_path, PathBuf::from("out"));
    }

    #[test]
    fn test_resolved_paths_are_absolute() {
        let config = EnvironmentConfig::default().resolved().unwrap();
        assert!(config.output_path.is_absolute());
        assert!(config.role_catalog_path.is_absolute());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        assert!(EnvironmentConfig::load(Some(Path::new("/nonexistent/config.yaml"))).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, SAMPLE).unwrap();
        let config = EnvironmentConfig::load(Some(&path)).unwrap();
        assert!(config.output_path.is_absolute());
    }
}
