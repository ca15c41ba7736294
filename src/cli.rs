// src/cli.rs
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::catalog::{apply_role, suggest_objective, suggested_skills, RoleCatalog};
use crate::config::ExportConfig;
use crate::core::FsOps;
use crate::environment::EnvironmentConfig;
use crate::generator::ResumeGenerator;
use crate::layout::{RenderOptions, TextShaper, UnicodeFont};
use crate::qr;
use crate::template_system::TemplateId;
use crate::types::ResumeProfile;
use crate::utils::{default_file_stem, validate_file_extension};
use crate::wizard::WizardStep;

#[derive(Parser)]
#[command(name = "resume-builder")]
#[command(about = "Render student resumes to PDF and HTML")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Environment config file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export a profile as a one-page PDF
    Render {
        profile: PathBuf,
        #[arg(short, long)]
        template: Option<TemplateId>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Draw the placeholder box instead of a QR code
        #[arg(long)]
        no_qr: bool,
        /// Output file name; defaults to Name_yyyyMMdd.pdf
        #[arg(long)]
        name: Option<String>,
    },
    /// Export a profile as a standalone HTML page
    Html {
        profile: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Write only the QR code PNG for a profile
    Qr {
        profile: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Minimum side of the PNG in pixels
        #[arg(
            long,
            default_value_t = qr::DEFAULT_QR_PX,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(qr::MAX_QR_PX))
        )]
        size: u32,
    },
    /// List career roles, or show one role in detail
    Roles {
        id: Option<String>,
        /// Compare the role's skills against this profile
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// List the available templates
    Templates,
    /// Check a profile against the wizard rules
    Validate { profile: PathBuf },
    /// Write a starter profile file
    Init {
        path: PathBuf,
        /// Seed the selected role and objective from the catalog
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_command(cli: Cli, env: &EnvironmentConfig) -> Result<()> {
    match cli.command {
        Command::Render {
            profile,
            template,
            output,
            no_qr,
            name,
        } => {
            let data = load_profile(&profile)?;
            let template = template
                .or(data.template_selected)
                .unwrap_or(env.default_template);

            let mut config = ExportConfig::from_environment(env).with_template(template);
            if let Some(dir) = output {
                config = config.with_output_dir(dir);
            }
            if no_qr {
                config = config.with_qr(false);
            }

            let options = render_options(env)?;
            let generator = ResumeGenerator::new(config);
            let path = generator
                .export_pdf(&data, name.as_deref(), &options)
                .with_context(|| format!("Failed to export {}", profile.display()))?;
            println!("{}", path.display());
        }

        Command::Html {
            profile,
            output,
            name,
        } => {
            let data = load_profile(&profile)?;
            let mut config = ExportConfig::from_environment(env);
            if let Some(dir) = output {
                config = config.with_output_dir(dir);
            }

            let path = ResumeGenerator::new(config)
                .export_html(&data, name.as_deref(), &RenderOptions::default())
                .with_context(|| format!("Failed to export {}", profile.display()))?;
            println!("{}", path.display());
        }

        Command::Qr {
            profile,
            output,
            size,
        } => {
            let data = load_profile(&profile)?;
            let payload = qr::payload_for(&data).with_context(|| {
                format!(
                    "{} has neither a LinkedIn URL nor an email to encode",
                    profile.display()
                )
            })?;

            let path = match output {
                Some(path) => {
                    validate_file_extension(&path.to_string_lossy(), &["png"])?;
                    path
                }
                None => ExportConfig::from_environment(env)
                    .qr_path(&default_file_stem(&data, chrono::Local::now().date_naive())),
            };
            qr::generate_qr_png(&payload, &path, size)
                .with_context(|| format!("Failed to write QR code to {}", path.display()))?;
            println!("{}", path.display());
        }

        Command::Roles { id, profile } => {
            let catalog = RoleCatalog::load(&env.role_catalog_path);
            match id {
                None => {
                    for role in catalog.roles() {
                        println!("{} {:<20} {}", role.icon, role.id, role.name);
                        println!("     {}", role.description);
                    }
                }
                Some(id) => {
                    let role = catalog
                        .find(&id)
                        .with_context(|| format!("Unknown role: {}", id))?;
                    println!("{} {}", role.icon, role.name);
                    println!("{}", role.description);
                    println!("\nSkills: {}", role.skills.join(", "));
                    println!("Projects: {}", role.projects.join(", "));
                    for tip in &role.tips {
                        println!("  - {}", tip);
                    }
                    println!("\nSuggested objective:\n{}", suggest_objective(role));

                    if let Some(path) = profile {
                        let data = load_profile(&path)?;
                        let missing = suggested_skills(role, &data);
                        if missing.is_empty() {
                            println!("\n✅ Profile already lists every {} skill", role.name);
                        } else {
                            println!("\nSkills to consider: {}", missing.join(", "));
                        }
                    }
                }
            }
        }

        Command::Templates => {
            for template in TemplateId::ALL {
                println!(
                    "{:<10} {:<22} {}",
                    template.slug(),
                    template.display_name(),
                    template.description()
                );
            }
        }

        Command::Validate { profile } => {
            let data = load_profile(&profile)?;
            let mut failures = 0;
            for step in WizardStep::ALL {
                match step.validate(&data) {
                    Ok(()) => println!("✅ {}", step),
                    Err(e) => {
                        failures += 1;
                        println!("❌ {}: {}", step, e);
                    }
                }
            }
            if failures > 0 {
                anyhow::bail!(
                    "{} has {} incomplete step(s)",
                    profile.display(),
                    failures
                );
            }
            info!("{} is complete", profile.display());
        }

        Command::Init { path, role, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }

            let mut data = ResumeProfile::new();
            if let Some(id) = role {
                let catalog = RoleCatalog::load(&env.role_catalog_path);
                match catalog.find(&id) {
                    Some(role) => apply_role(&mut data, role),
                    None => warn!("Unknown role {}, profile left without a role", id),
                }
            }

            let content = data.to_yaml()?;
            FsOps::write_atomic(&path, content.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Render options using the configured fallback font, or the system one when unset
fn render_options(env: &EnvironmentConfig) -> Result<RenderOptions> {
    let options = RenderOptions::default();
    match &env.unicode_font {
        Some(path) => {
            let font = UnicodeFont::load(path)
                .with_context(|| format!("Failed to load font {}", path.display()))?;
            Ok(options.with_shaper(TextShaper::new(Some(Arc::new(font)))))
        }
        None => Ok(options),
    }
}

fn load_profile(path: &Path) -> Result<ResumeProfile> {
    let profile = ResumeProfile::from_file(path)
        .with_context(|| format!("Failed to load profile {}", path.display()))?;
    info!("Loaded profile from {}", path.display());
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "resume-builder",
            "render",
            "me.json",
            "--template",
            "technical",
            "--no-qr",
            "--config",
            "custom.yaml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        match cli.command {
            Command::Render {
                template, no_qr, ..
            } => {
                assert_eq!(template, Some(TemplateId::Technical));
                assert!(no_qr);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_qr_size_is_bounded() {
        let parse = |size: &str| {
            Cli::try_parse_from(["resume-builder", "qr", "me.json", "--size", size])
        };
        assert!(parse("4096").is_ok());
        assert!(parse("4097").is_err());
        assert!(parse("4294967295").is_err());
        assert!(parse("0").is_err());
    }

    #[test]
    fn test_configured_font_must_load() {
        let env = EnvironmentConfig {
            unicode_font: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..EnvironmentConfig::default()
        };
        let err = render_options(&env).unwrap_err();
        assert!(err.to_string().contains("Failed to load font"));
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        assert!(
            Cli::try_parse_from(["resume-builder", "render", "me.json", "-t", "fancy"]).is_err()
        );
    }

    #[test]
    fn test_init_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.yaml");
        let env = EnvironmentConfig::default();

        let init = Cli::try_parse_from([
            "resume-builder",
            "init",
            path.to_str().unwrap(),
            "--role",
            "data_analyst",
        ])
        .unwrap();
        handle_command(init, &env).unwrap();

        let data = ResumeProfile::from_file(&path).unwrap();
        assert_eq!(data.selected_role.as_deref(), Some("Data Analyst"));

        let again = Cli::try_parse_from(["resume-builder", "init", path.to_str().unwrap()]).unwrap();
        assert!(handle_command(again, &env).is_err());

        let validate =
            Cli::try_parse_from(["resume-builder", "validate", path.to_str().unwrap()]).unwrap();
        assert!(handle_command(validate, &env).is_err());
    }
}
