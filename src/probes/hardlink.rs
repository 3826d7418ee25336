//! Hard link creation probe.
//!
//! sshfs historically reported success from `link()` without actually
//! creating the link, so the probe re-checks the link count of the source
//! file instead of trusting the return code alone.

use super::{Outcome, ProbeContext};
use crate::report::Reporter;

#[cfg(unix)]
pub fn run(cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    use std::fs::OpenOptions;
    use std::os::unix::fs::{MetadataExt, OpenOptionsExt};

    use crate::sys::remove_stale_file;

    let source = cx.path("file");
    let link = cx.path("hardlink");

    let file = match OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .mode(0o644)
        .open(&source)
    {
        Ok(f) => f,
        Err(e) => {
            reporter.warn(&format!("unable to touch file to hard-link: {}", e));
            return Outcome::Warn;
        }
    };

    if let Err(e) = remove_stale_file(&link) {
        reporter.warn(&format!("unable to remove stale hardlink: {}", e));
        return Outcome::Warn;
    }

    let old_link_count = match file.metadata() {
        Ok(meta) => meta.nlink(),
        Err(e) => {
            reporter.warn(&format!("unable to stat file to hard-link: {}", e));
            return Outcome::Warn;
        }
    };

    if let Err(e) = std::fs::hard_link(&source, &link) {
        reporter.fail(&format!("unable to create hard link: {}", e));
        return Outcome::Fail;
    }

    match file.metadata() {
        Ok(meta) if meta.nlink() == old_link_count + 1 => {
            reporter.pass(&format!(
                "created hard link, link count went from {} to {}",
                old_link_count,
                meta.nlink()
            ));
            Outcome::Pass
        }
        Ok(meta) => {
            reporter.fail(&format!(
                "link() succeeded but the link count was not incremented (still {})",
                meta.nlink()
            ));
            Outcome::Fail
        }
        Err(e) => {
            reporter.warn(&format!("unable to stat file to hard-link: {}", e));
            Outcome::Warn
        }
    }
}

#[cfg(not(unix))]
pub fn run(_cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    reporter.skip("hard link probe is only supported on Unix");
    Outcome::Skip
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use std::os::unix::fs::MetadataExt;
    use tempfile::TempDir;

    #[test]
    fn creates_hard_link_and_increments_nlink() {
        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());
        let mut rec = RecordingReporter::new();

        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        let meta = std::fs::metadata(cx.path("file")).unwrap();
        assert_eq!(meta.nlink(), 2);
        assert!(cx.path("hardlink").exists());
    }

    #[test]
    fn second_run_replaces_stale_hardlink() {
        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());

        let mut rec = RecordingReporter::new();
        assert_eq!(run(&cx, &mut rec), Outcome::Pass);

        // Without the stale-artifact cleanup this would fail with EEXIST
        // and nlink 2 instead of incrementing to 3.
        let mut rec = RecordingReporter::new();
        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        assert_eq!(std::fs::metadata(cx.path("file")).unwrap().nlink(), 2);
    }
}
