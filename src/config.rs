// src/config.rs
use std::path::{Path, PathBuf};

use crate::environment::EnvironmentConfig;
use crate::qr::DEFAULT_QR_PX;
use crate::template_system::TemplateId;

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub template: TemplateId,
    pub output_dir: PathBuf,
    pub qr_dir: PathBuf,
    pub include_qr: bool,
    pub qr_px: u32,
    pub root_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        // Capture the current directory at creation time
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            template: TemplateId::Modern,
            output_dir: PathBuf::from("output"),
            qr_dir: PathBuf::from("resources/assets/qr"),
            include_qr: true,
            qr_px: DEFAULT_QR_PX,
            root_dir: current_dir,
        }
    }

    pub fn from_environment(env: &EnvironmentConfig) -> Self {
        Self::new()
            .with_template(env.default_template)
            .with_output_dir(env.output_path.clone())
            .with_qr_dir(env.qr_path.clone())
            .with_qr(env.include_qr)
            .with_qr_px(env.qr_px)
    }

    pub fn with_template(mut self, template: TemplateId) -> Self {
        self.template = template;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_qr_dir(mut self, dir: PathBuf) -> Self {
        self.qr_dir = dir;
        self
    }

    pub fn with_qr(mut self, include_qr: bool) -> Self {
        self.include_qr = include_qr;
        self
    }

    pub fn with_qr_px(mut self, qr_px: u32) -> Self {
        self.qr_px = qr_px;
        self
    }

    fn absolute_path(&self, relative_path: &Path) -> PathBuf {
        if relative_path.is_absolute() {
            relative_path.to_path_buf()
        } else {
            self.root_dir.join(relative_path)
        }
    }

    pub fn output_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.output_dir)
    }

    pub fn qr_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.qr_dir)
    }

    /// Where an exported file named `file_name` lands
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir_absolute().join(file_name)
    }

    /// QR side artifact for an export stem, e.g. `Asha_Rao_20240305_qr.png`
    pub fn qr_path(&self, stem: &str) -> PathBuf {
        self.qr_dir_absolute().join(format!("{}_qr.png", stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_paths() {
        let config = ExportConfig::new()
            .with_template(TemplateId::Technical)
            .with_output_dir(PathBuf::from("/tmp/out"))
            .with_qr_dir(PathBuf::from("qr"))
            .with_qr(false);

        assert_eq!(config.template, TemplateId::Technical);
        assert!(!config.include_qr);
        assert_eq!(
            config.output_path("cv.pdf"),
            PathBuf::from("/tmp/out/cv.pdf")
        );
        assert_eq!(
            config.qr_path("Asha_Rao_20240305"),
            config.root_dir.join("qr/Asha_Rao_20240305_qr.png")
        );
    }

    #[test]
    fn test_from_environment() {
        let env = EnvironmentConfig {
            default_template: TemplateId::Creative,
            include_qr: false,
            qr_px: 320,
            ..EnvironmentConfig::default()
        };
        let config = ExportConfig::from_environment(&env);
        assert_eq!(config.template, TemplateId::Creative);
        assert!(!config.include_qr);
        assert_eq!(config.qr_px, 320);
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }
}
