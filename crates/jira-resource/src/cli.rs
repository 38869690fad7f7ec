//! Command line interface

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "jira-resource")]
#[command(about = "Concourse resource that creates, updates and transitions Jira issues", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Report new versions (always none)
    Check,

    /// Fetch a version into a directory
    In {
        /// Destination directory
        dir: PathBuf,
    },

    /// Create or update issues from the step params
    Out {
        /// Build directory that params file paths are relative to
        dir: PathBuf,
    },
}

const SCRIPT_NAMES: [&str; 3] = ["check", "in", "out"];

/// Concourse runs `/opt/resource/{check,in,out}`; when installed under one of
/// those names, the name becomes the subcommand.
pub fn with_script_name(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args: Vec<OsString> = args.into_iter().collect();

    let script = args
        .first()
        .and_then(|program| Path::new(program).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| SCRIPT_NAMES.contains(name))
        .map(OsString::from);

    if let Some(script) = script {
        args.insert(1, script);
    }

    args
}
