//! CLI command handlers.

mod config;
mod upload;

pub use config::run_show_config;
pub use upload::run_upload;
#[cfg(test)]
pub use upload::{resolve_metadata, resolve_policy};
