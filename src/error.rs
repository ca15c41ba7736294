// src/error.rs
//! Error types for resume rendering and export

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ResumeError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("QR encoding error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Font error: {0}")]
    Font(String),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResumeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ResumeResult<T> = Result<T, ResumeError>;
