//! Error types for fsprobe operations.
//!
//! Probes never abort the run on failure; they catch errors at the probe
//! boundary and turn them into printed diagnostics. [`ProbeError`] is the
//! type the probe helpers propagate internally with `?` before that
//! conversion happens.

use thiserror::Error;

/// Core error type for probe helpers.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A raw system call failed.
    #[cfg(unix)]
    #[error("{call} failed: {errno}")]
    Sys {
        call: &'static str,
        errno: nix::errno::Errno,
    },

    /// Embedded database error.
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for probe helpers.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ProbeError = io_err.into();
        assert!(matches!(err, ProbeError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[cfg(unix)]
    #[test]
    fn sys_error_displays_call_and_errno() {
        let err = ProbeError::Sys {
            call: "fcntl(F_SETLK)",
            errno: nix::errno::Errno::EACCES,
        };
        let msg = err.to_string();
        assert!(msg.contains("fcntl(F_SETLK)"));
        assert!(msg.contains("EACCES"));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ProbeError::Other(anyhow::anyhow!("test")))
        }
        assert!(returns_error().is_err());
    }
}
