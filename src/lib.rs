// src/lib.rs
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod environment;
pub mod error;
pub mod generator;
pub mod html;
pub mod layout;
pub mod logging;
pub mod qr;
pub mod render;
pub mod template_system;
pub mod types;
pub mod utils;
pub mod validation;
pub mod wizard;

use std::path::{Path, PathBuf};

pub use catalog::RoleCatalog;
pub use config::ExportConfig;
pub use error::{ResumeError, ResumeResult};
pub use generator::ResumeGenerator;
pub use layout::{render, RenderOptions, RenderedResume};
pub use template_system::TemplateId;
pub use types::ResumeProfile;
pub use wizard::{StepOutcome, Wizard, WizardStep};

/// Convenience function for quick PDF export of a profile file
pub fn export_resume(
    profile_path: &Path,
    template: TemplateId,
    output_dir: Option<PathBuf>,
) -> ResumeResult<PathBuf> {
    let profile = ResumeProfile::from_file(profile_path)?;

    let mut config = ExportConfig::new().with_template(template);
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }

    ResumeGenerator::new(config).export_pdf(&profile, None, &RenderOptions::default())
}
