//! Nested directory creation probe.
//!
//! On some CIFS mounts a freshly created directory briefly denies entry
//! creation below it, which used to break OpenOffice.org and gcompris.
//! Creating several levels in quick succession flushes the problem out.

use super::{Outcome, ProbeContext};
use crate::report::Reporter;

/// Number of nested levels to create.
const LEVELS: usize = 5;

#[cfg(unix)]
pub fn run(cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    use std::fs::DirBuilder;
    use std::os::unix::fs::DirBuilderExt;

    use crate::sys::remove_stale_tree;

    let root = cx.path("test");
    if let Err(e) = remove_stale_tree(&root) {
        reporter.warn(&format!("unable to remove stale directory tree: {}", e));
        return Outcome::Warn;
    }

    let mut path = root;
    for _ in 0..LEVELS {
        if let Err(e) = DirBuilder::new().mode(0o777).create(&path) {
            reporter.fail(&format!(
                "unable to create directory '{}': {}",
                path.display(),
                e
            ));
            return Outcome::Fail;
        }
        path = path.join("test");
    }

    reporter.pass(&format!("created {} nested directories", LEVELS));
    Outcome::Pass
}

#[cfg(not(unix))]
pub fn run(_cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    reporter.skip("nested directory probe is only supported on Unix");
    Outcome::Skip
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use tempfile::TempDir;

    #[test]
    fn creates_five_levels() {
        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());
        let mut rec = RecordingReporter::new();

        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        let deepest = temp.path().join("test/test/test/test/test");
        assert!(deepest.is_dir());
    }

    #[test]
    fn second_run_starts_from_clean_tree() {
        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());

        let mut rec = RecordingReporter::new();
        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        let mut rec = RecordingReporter::new();
        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        assert!(rec.failures().is_empty());
    }

    #[test]
    fn reports_level_that_failed() {
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
            assert!(rec.contains("unable to create directory"));
        }

        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
