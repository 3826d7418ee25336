//! Probe outcome reporting.
//!
//! This module provides:
//! - [`Reporter`] trait so the runner and probes can be exercised in tests
//! - [`ConsoleReporter`] for terminal output
//! - [`RecordingReporter`] for assertions in tests
//! - [`ProbeTheme`] with the `console` styles used for diagnostics
//!
//! Diagnostics are printed the moment a probe produces them and are not
//! retained; only [`RecordingReporter`] keeps them, for tests.

use console::Style;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show every diagnostic line.
    #[default]
    Normal,
    /// Show only warnings, failures, and the final summary.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows passing and informational lines.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Severity of a single diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Probe,
    Detail,
    Pass,
    Warn,
    Fail,
    Skip,
    Summary,
}

/// Trait for probe output.
///
/// Probes report individual diagnostic lines through this trait; the runner
/// adds probe headers and the closing summary.
pub trait Reporter {
    /// Announce a probe before it runs.
    fn probe(&mut self, name: &str, summary: &str);

    /// An indented informational line (e.g. one locking step).
    fn detail(&mut self, msg: &str);

    /// The probed behavior worked.
    fn pass(&mut self, msg: &str);

    /// Something preparatory failed; the verdict is inconclusive.
    fn warn(&mut self, msg: &str);

    /// The probed behavior is broken.
    fn fail(&mut self, msg: &str);

    /// The probe did not run on this platform or configuration.
    fn skip(&mut self, msg: &str);

    /// The closing summary line, always shown.
    fn summary(&mut self, msg: &str);
}

/// fsprobe's visual theme.
#[derive(Debug, Clone)]
pub struct ProbeTheme {
    /// Style for passing diagnostics (green).
    pub pass: Style,
    /// Style for warnings (orange).
    pub warn: Style,
    /// Style for failures (red bold).
    pub fail: Style,
    /// Style for probe titles (bold).
    pub title: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
}

impl Default for ProbeTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            pass: Style::new().green(),
            warn: Style::new().color256(208),
            fail: Style::new().red().bold(),
            title: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            pass: Style::new(),
            warn: Style::new(),
            fail: Style::new(),
            title: Style::new(),
            dim: Style::new(),
        }
    }

    /// Format a probe title line.
    pub fn format_probe(&self, name: &str, summary: &str) -> String {
        format!(
            "{} {}",
            self.title.apply_to(format!("◆ {}", name)),
            self.dim.apply_to(summary)
        )
    }

    /// Format a passing diagnostic (icon + text in green).
    pub fn format_pass(&self, msg: &str) -> String {
        format!("  {}", self.pass.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning (icon + text in orange).
    pub fn format_warn(&self, msg: &str) -> String {
        format!("  {}", self.warn.apply_to(format!("⚠ {}", msg)))
    }

    /// Format a failure (icon + text in red bold).
    pub fn format_fail(&self, msg: &str) -> String {
        format!("  {}", self.fail.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped probe (icon + text in dim).
    pub fn format_skip(&self, msg: &str) -> String {
        format!("  {}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format an indented informational line.
    pub fn format_detail(&self, msg: &str) -> String {
        format!("    {}", msg)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}

/// Reporter that prints styled diagnostics to standard output.
pub struct ConsoleReporter {
    theme: ProbeTheme,
    mode: OutputMode,
}

impl ConsoleReporter {
    /// Create a console reporter, picking colors from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ProbeTheme::new()
        } else {
            ProbeTheme::plain()
        };
        Self { theme, mode }
    }

    /// Create a console reporter with an explicit theme.
    pub fn with_theme(theme: ProbeTheme, mode: OutputMode) -> Self {
        Self { theme, mode }
    }
}

impl Reporter for ConsoleReporter {
    fn probe(&mut self, name: &str, summary: &str) {
        if self.mode.shows_detail() {
            println!("{}", self.theme.format_probe(name, summary));
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", self.theme.format_detail(msg));
        }
    }

    fn pass(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", self.theme.format_pass(msg));
        }
    }

    fn warn(&mut self, msg: &str) {
        println!("{}", self.theme.format_warn(msg));
    }

    fn fail(&mut self, msg: &str) {
        println!("{}", self.theme.format_fail(msg));
    }

    fn skip(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", self.theme.format_skip(msg));
        }
    }

    fn summary(&mut self, msg: &str) {
        println!("{}", msg);
    }
}

/// Reporter that records every line for test assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Vec<(Level, String)>,
}

impl RecordingReporter {
    /// Create an empty recording reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines in order.
    pub fn lines(&self) -> &[(Level, String)] {
        &self.lines
    }

    /// Messages recorded at the given level.
    pub fn at_level(&self, level: Level) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// Recorded failure messages.
    pub fn failures(&self) -> Vec<&str> {
        self.at_level(Level::Fail)
    }

    /// Recorded warning messages.
    pub fn warnings(&self) -> Vec<&str> {
        self.at_level(Level::Warn)
    }

    /// True if any line at any level contains the fragment.
    pub fn contains(&self, fragment: &str) -> bool {
        self.lines.iter().any(|(_, m)| m.contains(fragment))
    }
}

impl Reporter for RecordingReporter {
    fn probe(&mut self, name: &str, summary: &str) {
        self.lines
            .push((Level::Probe, format!("{}: {}", name, summary)));
    }

    fn detail(&mut self, msg: &str) {
        self.lines.push((Level::Detail, msg.to_string()));
    }

    fn pass(&mut self, msg: &str) {
        self.lines.push((Level::Pass, msg.to_string()));
    }

    fn warn(&mut self, msg: &str) {
        self.lines.push((Level::Warn, msg.to_string()));
    }

    fn fail(&mut self, msg: &str) {
        self.lines.push((Level::Fail, msg.to_string()));
    }

    fn skip(&mut self, msg: &str) {
        self.lines.push((Level::Skip, msg.to_string()));
    }

    fn summary(&mut self, msg: &str) {
        self.lines.push((Level::Summary, msg.to_string()));
    }
}
