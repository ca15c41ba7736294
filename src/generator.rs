// src/generator.rs
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::core::FsOps;
use crate::error::ResumeResult;
use crate::html::render_html;
use crate::layout::{render, RenderOptions, RenderedResume};
use crate::qr;
use crate::types::ResumeProfile;
use crate::utils::{default_file_stem, ensure_extension};

pub struct ResumeGenerator {
    pub config: ExportConfig,
}

impl ResumeGenerator {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// File stem used when the caller does not name the export
    pub fn default_file_name(profile: &ResumeProfile, date: NaiveDate) -> String {
        default_file_stem(profile, date)
    }

    /// Render and write the PDF. Returns the final path.
    /// When the PDF cannot be written, the QR generated for it is removed again.
    pub fn export_pdf(
        &self,
        profile: &ResumeProfile,
        file_name: Option<&str>,
        options: &RenderOptions,
    ) -> ResumeResult<PathBuf> {
        let file_name = self.resolve_file_name(profile, file_name, "pdf", options);
        let output_path = self.config.output_path(&file_name);

        let qr_path = self.prepare_qr(profile, &stem_of(&file_name));
        let rendered = render(profile, self.config.template, qr_path.as_deref(), options);
        let written = rendered
            .to_pdf()
            .and_then(|bytes| FsOps::write_atomic(&output_path, &bytes).map(|()| bytes));
        let bytes = match written {
            Ok(bytes) => bytes,
            Err(e) => {
                if let Some(qr_path) = &qr_path {
                    warn!(
                        "Removing {} after failed export to {}",
                        qr_path.display(),
                        output_path.display()
                    );
                    FsOps::remove_quietly(qr_path);
                }
                return Err(e);
            }
        };

        info!(
            "✅ Exported {} template to {} ({} bytes{})",
            rendered.template,
            output_path.display(),
            bytes.len(),
            if rendered.qr_embedded { ", with QR" } else { "" }
        );
        Ok(output_path)
    }

    pub fn export_html(
        &self,
        profile: &ResumeProfile,
        file_name: Option<&str>,
        options: &RenderOptions,
    ) -> ResumeResult<PathBuf> {
        let file_name = self.resolve_file_name(profile, file_name, "html", options);
        let output_path = self.config.output_path(&file_name);

        let html = render_html(profile, options.generated_at);
        FsOps::write_atomic(&output_path, html.as_bytes())?;

        info!("✅ Exported HTML resume to {}", output_path.display());
        Ok(output_path)
    }

    /// Write the QR PNG for this export stem. `None` when the profile has
    /// neither a LinkedIn URL nor an email to encode.
    pub fn generate_qr(
        &self,
        profile: &ResumeProfile,
        stem: &str,
    ) -> ResumeResult<Option<PathBuf>> {
        let Some(payload) = qr::payload_for(profile) else {
            return Ok(None);
        };
        let path = self.config.qr_path(stem);
        qr::generate_qr_png(&payload, &path, self.config.qr_px)?;
        Ok(Some(path))
    }

    /// Lay the resume out with the configured template, generating the QR first when enabled.
    /// A QR that cannot be produced falls back to the placeholder box.
    pub fn render(
        &self,
        profile: &ResumeProfile,
        stem: &str,
        options: &RenderOptions,
    ) -> RenderedResume {
        let qr_path = self.prepare_qr(profile, stem);
        render(profile, self.config.template, qr_path.as_deref(), options)
    }

    fn prepare_qr(&self, profile: &ResumeProfile, stem: &str) -> Option<PathBuf> {
        if !self.config.include_qr {
            return None;
        }
        match self.generate_qr(profile, stem) {
            Ok(path) => path,
            Err(e) => {
                warn!("QR generation failed for {}: {}", stem, e);
                None
            }
        }
    }

    fn resolve_file_name(
        &self,
        profile: &ResumeProfile,
        file_name: Option<&str>,
        ext: &str,
        options: &RenderOptions,
    ) -> String {
        let name = file_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                Self::default_file_name(profile, options.generated_at.date_naive())
            });
        ensure_extension(&name, ext)
    }
}

fn stem_of(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}
