//! Embedded database probe (feature `sqlite`).
//!
//! Opens an SQLite database in the scratch directory and creates a table,
//! the way gcompris does on first start. Exercises the library's own
//! open/lock path on top of whatever the filesystem provides.

use super::{Outcome, ProbeContext};
use crate::error::Result;
use crate::report::Reporter;
use crate::sys::remove_stale_file;

const CREATE_TABLE_USERS: &str = "CREATE TABLE users (user_id INT UNIQUE, login TEXT, \
     lastname TEXT, firstname TEXT, birthdate TEXT, class_id INT)";

fn open_and_create(path: &std::path::Path) -> Result<()> {
    let conn = rusqlite::Connection::open(path)?;
    conn.execute(CREATE_TABLE_USERS, [])?;
    Ok(())
}

pub fn run(cx: &ProbeContext, reporter: &mut dyn Reporter) -> Outcome {
    let path = cx.path("testsqlite.db");
    if let Err(e) = remove_stale_file(&path) {
        reporter.warn(&format!("unable to remove stale database: {}", e));
        return Outcome::Warn;
    }

    match open_and_create(&path) {
        Ok(()) => {
            reporter.pass("database open and table creation worked");
            Outcome::Pass
        }
        Err(e) => {
            reporter.fail(&format!("database open failed: {}", e));
            Outcome::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use tempfile::TempDir;

    #[test]
    fn opens_database_and_creates_table() {
        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());
        let mut rec = RecordingReporter::new();

        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        assert!(cx.path("testsqlite.db").exists());
    }

    #[test]
    fn replaces_stale_database_from_previous_run() {
        let temp = TempDir::new().unwrap();
        let cx = ProbeContext::new(temp.path());

        let mut rec = RecordingReporter::new();
        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
        // A second run must not trip over the existing users table.
        let mut rec = RecordingReporter::new();
        assert_eq!(run(&cx, &mut rec), Outcome::Pass);
    }
}
