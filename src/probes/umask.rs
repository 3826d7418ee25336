//! umask probe.
//!
//! Creates a file with mode 666 under umask 000 and again under umask 007,
//! checking the effective mode each time. sshfs was seen ignoring the
//! process umask entirely. The process umask is restored afterwards no
//! matter what happened.

use super::{Outcome, ProbeContext};
use crate::report::Reporter;

/// Serializes tests that touch the process-global umask; the default test
/// harness runs tests on parallel threads.
#[cfg(all(test, unix))]
pub(crate) static UMASK_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// The (umask, expected effective mode) cases the probe checks.
#[cfg(unix)]
const CASES: &[(u32, u32)] = &[(0o000, 0o666), (0o007, 0o660)];

/// Requested creation mode for every case.
#[cfg(unix)]
const REQUESTED_MODE: u32 = 0o666;

/// Create `path` with the requested mode, unlink it, and return the
/// effective permission bits of the still-open file.
#[cfg(unix)]
fn touch_get_mode(path: &std::path::Path, mode: u32) -> crate::error::Result<u32> {
    use std::fs::OpenOptions;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    // O_CREAT only applies the mode to a file it actually creates; a stale
    // file from an interrupted run would be reported as a mode mismatch.
    crate::sys::remove_stale_file(path)?;
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .mode(mode)
        .open(path)?;
    std::fs::remove_file(path)?;
    let meta = file.metadata()?;
    Ok(meta.permissions().mode() & 0o777)
}

#[cfg(unix)]
pub fn run(cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    use nix::sys::stat::{umask, Mode};

    let path = cx.path("foobar");
    let orig_umask = umask(Mode::empty());

    let mut outcome = Outcome::Pass;
    for &(mask, expected) in CASES {
        umask(Mode::from_bits_truncate(mask as libc::mode_t));
        match touch_get_mode(&path, REQUESTED_MODE) {
            Ok(got) if got == expected => {
                reporter.pass(&format!(
                    "mode {:o} with umask {:03o} yields {:o}",
                    REQUESTED_MODE, mask, got
                ));
            }
            Ok(got) => {
                reporter.fail(&format!(
                    "wrong file mode {:o} when creating with mode {:o} and umask {:03o}",
                    got, REQUESTED_MODE, mask
                ));
                outcome = Outcome::Fail;
            }
            Err(e) => {
                reporter.warn(&format!("unable to create mode-test file: {}", e));
                if outcome == Outcome::Pass {
                    outcome = Outcome::Warn;
                }
            }
        }
    }

    umask(orig_umask);
    outcome
}

#[cfg(not(unix))]
pub fn run(_cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    reporter.skip("umask probe is only supported on Unix");
    Outcome::Skip
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use nix::sys::stat::{umask, Mode};
    use tempfile::TempDir;

    #[test]
    fn umask_is_honored_and_restored_on_local_fs() {
        let _guard = UMASK_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());
        let mut rec = RecordingReporter::new();

        let before = umask(Mode::from_bits_truncate(0o022));
        umask(before);

        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        assert!(rec.failures().is_empty());

        let after = umask(Mode::from_bits_truncate(0o022));
        umask(after);
        assert_eq!(before, after);

        // The probe unlinks its test file after each case.
        assert!(!cx.path("foobar").exists());

        let orig = umask(Mode::from_bits_truncate(0o027));
        let got = touch_get_mode(&temp.path().join("probe-mode"), 0o666).unwrap();
        umask(orig);
        assert_eq!(got, 0o640);
    }

    #[test]
    fn stale_mode_test_file_does_not_skew_the_verdict() {
        use std::os::unix::fs::PermissionsExt;

        let _guard = UMASK_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());

        // Leftover from an interrupted run, with mode bits the probe would
        // never request.
        std::fs::write(cx.path("foobar"), "stale").unwrap();
        std::fs::set_permissions(cx.path("foobar"), std::fs::Permissions::from_mode(0o600))
            .unwrap();

        let mut rec = RecordingReporter::new();
        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        assert!(rec.failures().is_empty());
    }
}
