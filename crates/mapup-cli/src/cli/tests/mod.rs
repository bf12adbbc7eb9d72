//! CLI parse and resolution tests.

use super::{Cli, CliCommand, UploadArgs};
use clap::Parser;

pub(super) fn parse_cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

pub(super) fn parse(args: &[&str]) -> CliCommand {
    parse_cli(args).command
}

pub(super) fn parse_upload(args: &[&str]) -> UploadArgs {
    match parse(args) {
        CliCommand::Upload(a) => a,
        _ => panic!("expected Upload"),
    }
}
