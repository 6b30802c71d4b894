use crate::config::pin_config::PinConfig;
use crate::utils::error::{Result, UpdaterError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Checkout directory used when `--root` is not given, relative to `$HOME`.
pub const DEFAULT_ROOT_RELATIVE: &str = "code/spring-tips";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "pom-updater")]
#[command(about = "Pin repositories and Spring versions in every pom.xml under a directory")]
pub struct CliConfig {
    /// Directory to walk (defaults to $HOME/code/spring-tips)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// TOML file overriding the pinned repositories and versions
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Process descriptors without writing them back
    #[arg(long)]
    pub dry_run: bool,

    /// Abort on the first descriptor that fails instead of continuing
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[arg(
        short,
        long,
        help = "Enable verbose output, including the rewritten content of each descriptor"
    )]
    pub verbose: bool,
}

impl CliConfig {
    pub fn root_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }

        let home = std::env::var_os("HOME").ok_or_else(|| UpdaterError::MissingConfigError {
            field: "HOME (or --root)".to_string(),
        })?;
        Ok(PathBuf::from(home).join(DEFAULT_ROOT_RELATIVE))
    }

    pub fn pin_config(&self) -> Result<PinConfig> {
        match &self.config {
            Some(path) => PinConfig::from_file(path),
            None => Ok(PinConfig::default()),
        }
    }
}
