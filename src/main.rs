//! fsprobe CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use fsprobe::cli::Cli;
use fsprobe::probes::PROBES;
use fsprobe::report::{ConsoleReporter, OutputMode};
use fsprobe::runner::{ProbeRunner, RunOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("fsprobe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fsprobe=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("fsprobe starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    if cli.list {
        for probe in PROBES {
            println!("{:<10} {}", probe.name, probe.summary);
        }
        return ExitCode::SUCCESS;
    }

    let options = RunOptions {
        only: cli.only,
        skip: cli.skip,
    };
    let unknown = options.unknown_names();
    if !unknown.is_empty() {
        eprintln!(
            "error: unknown probe name(s): {} (see --list)",
            unknown.join(", ")
        );
        return ExitCode::from(2);
    }

    let dir = cli
        .dir
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| ".".into()));
    if !dir.is_dir() {
        eprintln!("error: scratch directory '{}' does not exist", dir.display());
        return ExitCode::from(2);
    }

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut reporter = ConsoleReporter::new(mode);

    if mode.shows_detail() {
        println!("Probing POSIX filesystem semantics in {}", dir.display());
    }
    let summary = ProbeRunner::new(dir, options).run(&mut reporter);
    tracing::debug!(?summary, "run complete");

    // Probe outcomes are diagnostics, not failures: always exit 0 so the
    // tool can run unattended from scripts that only want the report.
    ExitCode::SUCCESS
}
