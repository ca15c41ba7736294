// src/logging.rs
//! tracing setup: compact console output always, a JSON file log when configured.
//!
//! The log file location comes from the environment config, so the config is
//! loaded first under a console-only subscriber scoped to that call.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::environment::EnvironmentConfig;

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Load the environment config with its log lines written to `writer`.
pub fn load_environment<W>(
    config_path: Option<&Path>,
    writer: W,
    filter: EnvFilter,
) -> Result<EnvironmentConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().compact().with_writer(writer))
        .with(filter);
    tracing::subscriber::with_default(subscriber, || EnvironmentConfig::load(config_path))
}

/// Install the global subscriber for the rest of the process
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .with(file_layer)
        .with(env_filter())
        .try_init()
        .context("Failed to install the log subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_config_loading_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "local:\n  output_path: out\n").unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let env = load_environment(
            Some(path.as_path()),
            move || writer.clone(),
            EnvFilter::new("info"),
        )
        .unwrap();

        assert!(env.output_path.ends_with("out"));
        let logs = captured.text();
        assert!(logs.contains("Loading configuration"), "{logs}");
        assert!(logs.contains(&path.display().to_string()), "{logs}");
    }

    #[test]
    fn test_load_errors_still_propagate() {
        let captured = Captured::default();
        let writer = captured.clone();
        let result = load_environment(
            Some(Path::new("/nonexistent/config.yaml")),
            move || writer.clone(),
            EnvFilter::new("info"),
        );
        assert!(result.is_err());
    }
}
