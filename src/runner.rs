//! Probe execution.
//!
//! [`ProbeRunner`] walks the probe registry in its fixed order, applies the
//! `--only`/`--skip` selection, and tallies outcomes into a [`RunSummary`].
//! A failing probe never stops the ones after it; the probes are one-shot
//! truth checks, not operations to retry.

use std::path::PathBuf;

use crate::probes::{Outcome, ProbeContext, PROBES};
use crate::report::Reporter;

/// Probe selection options.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Run only these probes (empty means all).
    pub only: Vec<String>,
    /// Skip these probes.
    pub skip: Vec<String>,
}

impl RunOptions {
    /// Check whether a probe is selected by these options.
    pub fn selects(&self, name: &str) -> bool {
        if self.skip.iter().any(|s| s == name) {
            return false;
        }
        self.only.is_empty() || self.only.iter().any(|o| o == name)
    }

    /// Names in `--only`/`--skip` that match no registered probe.
    pub fn unknown_names(&self) -> Vec<&str> {
        self.only
            .iter()
            .chain(self.skip.iter())
            .map(String::as_str)
            .filter(|name| crate::probes::find(name).is_none())
            .collect()
    }
}

/// Tally of one run. Counts only; the diagnostic lines themselves are
/// printed as they happen and not retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ran: usize,
    pub passed: usize,
    pub warnings: usize,
    pub failures: usize,
    pub skipped: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: Outcome) {
        self.ran += 1;
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Warn => self.warnings += 1,
            Outcome::Fail => self.failures += 1,
            Outcome::Skip => self.skipped += 1,
        }
    }

    /// One-line rendering for the end of a run.
    pub fn render(&self) -> String {
        format!(
            "{} probes run: {} passed, {} warnings, {} failures, {} skipped",
            self.ran, self.passed, self.warnings, self.failures, self.skipped
        )
    }
}

/// Executes the registered probes in order against a scratch directory.
pub struct ProbeRunner {
    context: ProbeContext,
    options: RunOptions,
}

impl ProbeRunner {
    /// Create a runner for the given scratch directory.
    pub fn new(dir: impl Into<PathBuf>, options: RunOptions) -> Self {
        Self {
            context: ProbeContext::new(dir.into()),
            options,
        }
    }

    /// Run every selected probe and report the summary.
    pub fn run(&self, reporter: &mut dyn Reporter) -> RunSummary {
        let mut summary = RunSummary::default();

        for probe in PROBES {
            if !self.options.selects(probe.name) {
                tracing::debug!(probe = probe.name, "probe not selected");
                continue;
            }
            reporter.probe(probe.name, probe.summary);
            let outcome = (probe.run)(&self.context, reporter);
            tracing::debug!(probe = probe.name, ?outcome, "probe finished");
            summary.record(outcome);
        }

        reporter.summary(&summary.render());
        summary
    }
}
