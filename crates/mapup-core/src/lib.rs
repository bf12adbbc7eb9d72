pub mod config;
pub mod logging;

pub mod checksum;
pub mod metadata;
pub mod upload;
