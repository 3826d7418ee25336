//! CLI argument definitions.
//!
//! All arguments are defined with clap's derive macros on the [`Cli`]
//! struct. Running with no arguments executes every probe in the current
//! directory.

use clap::Parser;
use std::path::PathBuf;

/// fsprobe - Probe filesystem POSIX semantics.
///
/// Runs a fixed checklist of filesystem behavior probes (symlinks, hard
/// links, nested directories, umask handling, byte-range locking) in a
/// scratch directory and reports which ones this filesystem gets wrong.
/// Intended for network mounts such as CIFS or sshfs. The exit code is 0
/// regardless of probe outcomes.
#[derive(Debug, Parser)]
#[command(name = "fsprobe")]
#[command(author, version, about)]
pub struct Cli {
    /// Scratch directory to create probe artifacts in (defaults to the
    /// current directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Run only the specified probes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip the specified probes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// List available probes and exit
    #[arg(long)]
    pub list: bool,

    /// Show only warnings, failures, and the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
