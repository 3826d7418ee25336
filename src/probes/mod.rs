//! The filesystem probes.
//!
//! Each probe is one self-contained behavior check: a short sequence of
//! direct OS calls with immediate result inspection. Probes do not interact
//! with each other and report every finding through a [`Reporter`]; the
//! order they run in only matters for output readability.
//!
//! [`PROBES`] is the registry the runner iterates over.

pub mod hardlink;
pub mod locking;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod subdir;
pub mod symlink;
pub mod umask;

use std::path::{Path, PathBuf};

use crate::report::Reporter;

/// Outcome of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The probed behavior works as POSIX requires.
    Pass,
    /// A preparatory step failed; no verdict on the behavior itself.
    Warn,
    /// The probed behavior is broken on this filesystem.
    Fail,
    /// The probe did not run on this platform.
    Skip,
}

/// Ambient state shared by all probes: the scratch directory they create
/// their artifacts in.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    dir: PathBuf,
}

impl ProbeContext {
    /// Create a context rooted at the given scratch directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The scratch directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a probe artifact inside the scratch directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Definition of one probe in the registry.
pub struct ProbeDef {
    /// Probe name, as accepted by `--only` and `--skip`.
    pub name: &'static str,
    /// One-line description shown in headers and `--list`.
    pub summary: &'static str,
    /// The probe body.
    pub run: fn(&ProbeContext, &mut dyn Reporter) -> Outcome,
}

const SYMLINK: ProbeDef = ProbeDef {
    name: "symlink",
    summary: "symbolic link creation",
    run: symlink::run,
};
const HARDLINK: ProbeDef = ProbeDef {
    name: "hardlink",
    summary: "hard link creation and link count",
    run: hardlink::run,
};
const SUBDIR: ProbeDef = ProbeDef {
    name: "subdir",
    summary: "nested directory creation",
    run: subdir::run,
};
const UMASK: ProbeDef = ProbeDef {
    name: "umask",
    summary: "umask effect on file creation modes",
    run: umask::run,
};
#[cfg(feature = "sqlite")]
const SQLITE: ProbeDef = ProbeDef {
    name: "sqlite",
    summary: "embedded database open and table creation",
    run: sqlite::run,
};
const LOCKING: ProbeDef = ProbeDef {
    name: "locking",
    summary: "byte-range locking at the 1 GB boundary",
    run: locking::run,
};

/// All probes, in the order they run.
#[cfg(feature = "sqlite")]
pub const PROBES: &[ProbeDef] = &[SYMLINK, HARDLINK, SUBDIR, UMASK, SQLITE, LOCKING];

/// All probes, in the order they run.
#[cfg(not(feature = "sqlite"))]
pub const PROBES: &[ProbeDef] = &[SYMLINK, HARDLINK, SUBDIR, UMASK, LOCKING];

/// Look up a probe by name.
pub fn find(name: &str) -> Option<&'static ProbeDef> {
    PROBES.iter().find(|p| p.name == name)
}
