//! Byte-range locking probe.
//!
//! Replays the `fcntl(F_SETLK)` sequence SQLite issues when opening a
//! database: read and write locks around the 1 GB boundary, released in
//! ranges that differ from how they were taken. CIFS against a Windows
//! 2003 server rejected parts of this sequence, which broke every
//! application embedding SQLite on such a mount.

use super::{Outcome, ProbeContext};
use crate::report::Reporter;

/// First lock byte, at the 1 GB boundary (SQLite's `PENDING_BYTE`).
pub const LOCK_BASE: u64 = 0x4000_0000;

/// Lock type requested for one byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKind {
    /// Shared read lock (`F_RDLCK`).
    Read,
    /// Exclusive write lock (`F_WRLCK`).
    Write,
    /// Release (`F_UNLCK`).
    Unlock,
}

impl LockKind {
    fn verb(self) -> &'static str {
        match self {
            Self::Read => "read-locking",
            Self::Write => "write-locking",
            Self::Unlock => "unlocking",
        }
    }
}

/// One byte-range lock request. Built per call and discarded as soon as the
/// call returns.
#[derive(Debug, Clone, Copy)]
pub struct LockRange {
    /// Byte offset the range starts at.
    pub offset: u64,
    /// Number of bytes in the range.
    pub len: u64,
    /// Requested lock type.
    pub kind: LockKind,
    /// Process id of the requesting process.
    pub owner: u32,
}

impl LockRange {
    /// Build a request owned by the current process.
    pub fn new(kind: LockKind, offset: u64, len: u64) -> Self {
        Self {
            offset,
            len,
            kind,
            owner: std::process::id(),
        }
    }

    /// Human-readable description, e.g. "read-locking 510 bytes from 1073741826".
    pub fn describe(&self) -> String {
        let unit = if self.len == 1 { "byte" } else { "bytes" };
        format!(
            "{} {} {} from {}",
            self.kind.verb(),
            self.len,
            unit,
            self.offset
        )
    }

    /// Issue the request against an open file via a non-blocking
    /// `fcntl(F_SETLK)`.
    #[cfg(unix)]
    pub fn apply(&self, file: &std::fs::File) -> crate::error::Result<()> {
        use std::os::unix::io::AsRawFd;

        let l_type = match self.kind {
            LockKind::Read => libc::F_RDLCK,
            LockKind::Write => libc::F_WRLCK,
            LockKind::Unlock => libc::F_UNLCK,
        };
        let flock = libc::flock {
            l_type: l_type as libc::c_short,
            l_whence: libc::SEEK_SET as libc::c_short,
            l_start: self.offset as libc::off_t,
            l_len: self.len as libc::off_t,
            // Ignored by the kernel for F_SETLK; carried for parity with
            // the struct the original tool filled in.
            l_pid: self.owner as libc::pid_t,
        };

        nix::fcntl::fcntl(
            file.as_raw_fd(),
            nix::fcntl::FcntlArg::F_SETLK(&flock),
        )
        .map_err(|errno| crate::error::ProbeError::Sys {
            call: "fcntl(F_SETLK)",
            errno,
        })?;
        Ok(())
    }
}

/// The fixed lock transition sequence, in order.
#[cfg(unix)]
const SEQUENCE: &[(LockKind, u64, u64)] = &[
    (LockKind::Read, LOCK_BASE, 1),
    (LockKind::Read, LOCK_BASE + 2, 510),
    (LockKind::Unlock, LOCK_BASE, 1),
    (LockKind::Write, LOCK_BASE, 1),
    (LockKind::Write, LOCK_BASE + 2, 510),
    (LockKind::Unlock, LOCK_BASE, 2),
];

#[cfg(unix)]
pub fn run(cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    use std::fs::OpenOptions;
    use std::os::unix::fs::OpenOptionsExt;

    use crate::sys::remove_stale_file;

    let path = cx.path("testsqlite.db");
    if let Err(e) = remove_stale_file(&path) {
        reporter.warn(&format!("unable to remove stale lock-test file: {}", e));
        return Outcome::Warn;
    }

    let file = match OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .mode(0o644)
        .open(&path)
    {
        Ok(f) => f,
        Err(e) => {
            reporter.warn(&format!("unable to create lock-test file: {}", e));
            return Outcome::Warn;
        }
    };

    let mut outcome = Outcome::Pass;
    for &(kind, offset, len) in SEQUENCE {
        let range = LockRange::new(kind, offset, len);
        match range.apply(&file) {
            Ok(()) => reporter.detail(&range.describe()),
            Err(e) => {
                reporter.fail(&format!("{}: {}", range.describe(), e));
                outcome = Outcome::Fail;
            }
        }
    }

    if outcome == Outcome::Pass {
        reporter.pass("all byte-range lock transitions succeeded");
    }
    outcome
}

#[cfg(not(unix))]
pub fn run(_cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    reporter.skip("byte-range locking probe is only supported on Unix");
    Outcome::Skip
}
