// src/core/fs_ops.rs
//! File system operations shared by every export

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ResumeError, ResumeResult};

const TEMP_SUFFIX: &str = ".tmp";

pub struct FsOps;

impl FsOps {
    pub fn ensure_dir_exists(path: &Path) -> ResumeResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| ResumeError::io(path, e))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub fn read_file_safe(path: &Path) -> ResumeResult<String> {
        fs::read_to_string(path).map_err(|e| ResumeError::io(path, e))
    }

    /// Sibling path used while `path` is being written.
    pub fn temp_path_for(path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        path.with_file_name(format!(".{}.{}{}", file_name, Uuid::new_v4(), TEMP_SUFFIX))
    }

    pub fn is_temp_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.') && n.ends_with(TEMP_SUFFIX))
    }

    /// Write to a temporary sibling, then rename over `path`.
    /// A failed write leaves neither the temporary nor a partial `path` behind.
    pub fn write_atomic(path: &Path, bytes: &[u8]) -> ResumeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir_exists(parent)?;
        }

        let temp = Self::temp_path_for(path);
        let result = fs::write(&temp, bytes)
            .map_err(|e| ResumeError::io(&temp, e))
            .and_then(|_| fs::rename(&temp, path).map_err(|e| ResumeError::io(path, e)));

        if result.is_err() {
            Self::remove_quietly(&temp);
        }
        result
    }

    /// Best-effort removal; failures are logged, never returned
    pub fn remove_quietly(path: &Path) {
        if path.exists() {
            if let Err(e) = fs::remove_file(path) {
                warn!("Failed to clean up {}: {}", path.display(), e);
            }
        }
    }
}
