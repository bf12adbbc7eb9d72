//! CLI for the mapup mapping-file uploader.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mapup_core::config::{self, UploaderConfig};
use std::path::PathBuf;

use commands::{run_show_config, run_upload};

/// Top-level CLI for mapup.
#[derive(Debug, Parser)]
#[command(name = "mapup")]
#[command(about = "mapup: upload mapping files with build metadata", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/mapup/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also show debug output on the console.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Upload a mapping file together with its build metadata.
    Upload(UploadArgs),

    /// Show the config file path and the effective configuration.
    Config,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Mapping file to attach.
    #[arg(long, value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Form field name for the mapping file (default from config, else "proguard").
    #[arg(long, value_name = "NAME")]
    pub field: Option<String>,

    /// TOML or JSON file with resolved build metadata; flags below override it.
    #[arg(long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    #[arg(long, env = "MAPUP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, value_name = "ID")]
    pub app_id: Option<String>,

    #[arg(long)]
    pub version_code: Option<String>,

    #[arg(long, value_name = "UUID")]
    pub build_uuid: Option<String>,

    #[arg(long)]
    pub version_name: Option<String>,

    /// Ingestion endpoint (overrides config).
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Replace a mapping already uploaded for this build.
    #[arg(long, conflicts_with = "no_overwrite")]
    pub overwrite: bool,

    /// Keep an existing mapping even if the config enables overwrite.
    #[arg(long)]
    pub no_overwrite: bool,

    /// Retries after the first attempt (capped at 5).
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Per-attempt connect and read timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Exit non-zero when the upload does not succeed.
    #[arg(long, conflicts_with = "no_fail_on_error")]
    pub fail_on_error: bool,

    /// Only warn when the upload does not succeed.
    #[arg(long)]
    pub no_fail_on_error: bool,
}

impl UploadArgs {
    /// Explicit overwrite choice from the flags, if any was given.
    pub fn overwrite_override(&self) -> Option<bool> {
        if self.overwrite {
            Some(true)
        } else if self.no_overwrite {
            Some(false)
        } else {
            None
        }
    }

    /// Explicit fail policy from the flags, if any was given.
    pub fn fail_on_error_override(&self) -> Option<bool> {
        if self.fail_on_error {
            Some(true)
        } else if self.no_fail_on_error {
            Some(false)
        } else {
            None
        }
    }
}

impl Cli {
    fn load_config(&self) -> Result<UploaderConfig> {
        match &self.config {
            Some(path) => config::load_from(path),
            None => config::load_or_init(),
        }
    }

    pub fn run(self) -> Result<()> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match &self.command {
            CliCommand::Upload(args) => run_upload(&cfg, args)?,
            CliCommand::Config => run_show_config(&cfg, self.config.as_deref())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
