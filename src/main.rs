use anyhow::Result;
use clap::Parser;
use resume_builder::cli::{handle_command, Cli};
use resume_builder::logging;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config decides where the file log goes, so it loads under a console-only subscriber
    let env = logging::load_environment(
        cli.config.as_deref(),
        std::io::stderr,
        logging::env_filter(),
    )?;
    logging::init(env.log_file.as_deref())?;

    info!(
        "Output: {}, QR: {}",
        env.output_path.display(),
        env.qr_path.display()
    );

    handle_command(cli, &env)
}
