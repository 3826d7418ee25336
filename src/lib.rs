//! fsprobe - Probe filesystem POSIX semantics.
//!
//! fsprobe runs a fixed checklist of filesystem behavior probes against a
//! scratch directory and reports, per probe, whether this filesystem
//! behaves the way POSIX says it should. It exists because network
//! filesystems (CIFS from a Windows server, sshfs) get enough of these
//! semantics wrong to break ordinary desktop software, and the breakage is
//! much easier to diagnose with a checklist than from the broken
//! application.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`probes`] - The individual probes and their registry
//! - [`report`] - Diagnostic reporting trait and console/test reporters
//! - [`runner`] - Ordered probe execution and summary tallying
//! - [`sys`] - Shared filesystem helpers
//!
//! # Example
//!
//! ```no_run
//! use fsprobe::report::{ConsoleReporter, OutputMode};
//! use fsprobe::runner::{ProbeRunner, RunOptions};
//!
//! let runner = ProbeRunner::new(".", RunOptions::default());
//! let mut reporter = ConsoleReporter::new(OutputMode::Normal);
//! let summary = runner.run(&mut reporter);
//! println!("{}", summary.render());
//! ```

pub mod cli;
pub mod error;
pub mod probes;
pub mod report;
pub mod runner;
pub mod sys;

pub use error::{ProbeError, Result};
