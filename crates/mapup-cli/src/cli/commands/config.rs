//! `mapup config` – show where configuration lives and what is in effect.

use anyhow::Result;
use mapup_core::config::{self, UploaderConfig};
use std::path::Path;

pub fn run_show_config(cfg: &UploaderConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", cfg.to_toml_string()?);
    Ok(())
}
