//! fwenv CLI - pre-build hook entry point.
//!
//! The orchestrator captures stdout (the rendered definitions); all logging
//! goes to stderr.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

use fwenv::config::Settings;

// Version is embedded at build time
const VERSION: &str = env!("FWENV_VERSION");

#[derive(Parser)]
#[command(name = "fwenv")]
#[command(about = "Inject WLAN credentials and version metadata into firmware builds", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Directory containing .env, fwenv.toml and the git checkout
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Override the dotenv file path
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Output format for the definitions
    #[arg(long, value_enum, default_value_t = Format::Cflags)]
    format: Format,

    /// Skip source-control metadata
    #[arg(long)]
    no_git: bool,

    /// Skip the asset-generation step
    #[arg(long)]
    skip_assets: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Cflags,
    Cargo,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut settings = Settings::load(&cli.project_dir)?;
    if let Some(env_file) = cli.env_file {
        settings.env_file = env_file;
    }
    if cli.no_git {
        settings.git_metadata = false;
    }
    if cli.skip_assets {
        settings.assets_command.clear();
    }

    let defines = fwenv::inject(&cli.project_dir, &settings)?;

    let rendered = match cli.format {
        Format::Cflags => defines.render_cflags(),
        Format::Cargo => defines.render_cargo(),
        Format::Json => defines.render_json()?,
    };
    print!("{}", rendered);

    Ok(())
}
