//! Tests for tee and probe.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_tee() {
    match parse(&["streamy", "tee", "512", "head.bin"]) {
        CliCommand::Tee { limit, file } => {
            assert_eq!(limit, 512);
            assert_eq!(file, Path::new("head.bin"));
        }
        _ => panic!("expected Tee"),
    }
}

#[test]
fn cli_parse_tee_rejects_negative_limit() {
    assert!(Cli::try_parse_from(["streamy", "tee", "-1", "head.bin"]).is_err());
}

#[test]
fn cli_parse_probe() {
    match parse(&["streamy", "probe"]) {
        CliCommand::Probe { path } => assert!(path.is_none()),
        _ => panic!("expected Probe"),
    }
    match parse(&["streamy", "probe", "/etc/hostname"]) {
        CliCommand::Probe { path } => {
            assert_eq!(path.as_deref(), Some(Path::new("/etc/hostname")))
        }
        _ => panic!("expected Probe with path"),
    }
}
