//! CLI definition and argument parsing for secretmounts-cli.

use clap::{Args, Parser, Subcommand};
use secretmounts::SecretMountsConfig;
use std::path::PathBuf;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "secretmounts",
    author,
    version,
    about = "Prepare host secrets as container bind mounts"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
#[non_exhaustive]
pub enum Commands {
    /// Copy secrets into a container working directory and print its mounts
    Prepare(crate::commands::prepare::PrepareArgs),

    /// Parse mounts files and report every entry
    CheckConfig(crate::commands::check_config::CheckConfigArgs),
}

// ============================================================================
// GLOBAL FLAGS
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file path (optional)
    ///
    /// JSON file with secretmounts options such as mount_files and fips_marker.
    /// Missing fields keep their defaults.
    #[arg(long, global = true, env = "SECRETMOUNTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host file signalling FIPS mode
    #[arg(long, global = true, value_name = "PATH")]
    pub fips_marker: Option<PathBuf>,
}

impl GlobalFlags {
    /// Build the orchestration config: file (or defaults), then flag overrides.
    pub fn load_config(&self) -> anyhow::Result<SecretMountsConfig> {
        let mut config = match &self.config {
            Some(path) => SecretMountsConfig::load(path)?,
            None => SecretMountsConfig::default(),
        };

        if let Some(marker) = &self.fips_marker {
            config.fips_marker = marker.clone();
        }

        Ok(config)
    }
}
