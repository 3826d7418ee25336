//! Symbolic link creation probe.
//!
//! Some network filesystems (CIFS against a Windows server in particular)
//! refuse to create symlinks, which breaks software that keeps its
//! configuration behind them.

use super::{Outcome, ProbeContext};
use crate::report::Reporter;

#[cfg(unix)]
pub fn run(cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    use crate::sys::remove_stale_file;

    let link = cx.path("symlink");
    if let Err(e) = remove_stale_file(&link) {
        reporter.warn(&format!("unable to remove stale symlink: {}", e));
        return Outcome::Warn;
    }

    match std::os::unix::fs::symlink("file", &link) {
        Ok(()) => {
            reporter.pass("created symlink pointing at 'file'");
            Outcome::Pass
        }
        Err(e) => {
            reporter.fail(&format!("unable to create symlink: {}", e));
            Outcome::Fail
        }
    }
}

#[cfg(not(unix))]
pub fn run(_cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    reporter.skip("symlink probe is only supported on Unix");
    Outcome::Skip
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use tempfile::TempDir;

    #[test]
    fn creates_symlink_on_local_fs() {
        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());
        let mut rec = RecordingReporter::new();

        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        let meta = std::fs::symlink_metadata(cx.path("symlink")).unwrap();
        assert!(meta.file_type().is_symlink());
    }

    #[test]
    fn replaces_stale_symlink_from_previous_run() {
        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());
        std::os::unix::fs::symlink("elsewhere", cx.path("symlink")).unwrap();

        let mut rec = RecordingReporter::new();
        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        assert_eq!(
            std::fs::read_link(cx.path("symlink")).unwrap(),
            std::path::PathBuf::from("file")
        );
    }

    #[test]
    fn reports_failure_in_unwritable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("sealed");
        std::fs::create_dir(&dir).unwrap();
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555)).unwrap();

        let cx = ProbeContext::new(&dir);
        let mut rec = RecordingReporter::new();
        let outcome = run(&cx, &mut rec);

        // Root bypasses permission checks, so only assert when it failed.
        if outcome == Outcome::Fail {
            assert!(rec.contains("unable to create symlink"));
        }

        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
