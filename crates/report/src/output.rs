//! Writing rendered reports to disk

use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::ReportResult;

/// OS error codes meaning another process holds the file
#[cfg(unix)]
const LOCKED_OS_ERRORS: &[i32] = &[16]; // EBUSY
#[cfg(windows)]
const LOCKED_OS_ERRORS: &[i32] = &[32, 33]; // sharing / lock violation
#[cfg(not(any(unix, windows)))]
const LOCKED_OS_ERRORS: &[i32] = &[];

/// Whether a write failed because the target file is locked
pub fn is_locked(err: &io::Error) -> bool {
    err.raw_os_error()
        .map(|code| LOCKED_OS_ERRORS.contains(&code))
        .unwrap_or(false)
}

/// `report.xlsx` -> `report_<stamp>.xlsx`
pub fn timestamped_path(path: &Path, stamp: i64) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    };
    path.with_file_name(name)
}

/// Write report bytes, retrying once under a timestamped name when the target is locked.
/// Returns the path actually written.
pub fn write_report(path: &Path, bytes: &[u8]) -> ReportResult<PathBuf> {
    write_with(path, bytes, chrono::Utc::now().timestamp_millis(), |p, b| {
        std::fs::write(p, b)
    })
}

pub(crate) fn write_with<F>(path: &Path, bytes: &[u8], stamp: i64, mut write: F) -> ReportResult<PathBuf>
where
    F: FnMut(&Path, &[u8]) -> io::Result<()>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match write(path, bytes) {
        Ok(()) => Ok(path.to_path_buf()),
        Err(e) if is_locked(&e) => {
            warn!("'{}' is open or locked ({})", path.display(), e);
            let alternate = timestamped_path(path, stamp);
            write(&alternate, bytes)?;
            info!("Saved report to new file: {}", alternate.display());
            Ok(alternate)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamped_path() {
        assert_eq!(
            timestamped_path(Path::new("public/test_report.xlsx"), 1700000000000),
            PathBuf::from("public/test_report_1700000000000.xlsx")
        );
        assert_eq!(
            timestamped_path(Path::new("report"), 7),
            PathBuf::from("report_7")
        );
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("test_report.pdf");
        let written = write_report(&path, b"%PDF").unwrap();
        assert_eq!(written, path);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
    }

    #[cfg(unix)]
    #[test]
    fn test_locked_target_falls_back_to_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_report.xlsx");
        let mut attempts = Vec::new();

        let written = write_with(&path, b"data", 42, |p, b| {
            attempts.push(p.to_path_buf());
            if p == path.as_path() {
                Err(io::Error::from_raw_os_error(16))
            } else {
                std::fs::write(p, b)
            }
        })
        .unwrap();

        assert_eq!(written, dir.path().join("test_report_42.xlsx"));
        assert_eq!(attempts.len(), 2);
        assert!(!path.exists());
        assert_eq!(std::fs::read(&written).unwrap(), b"data");
    }

    #[test]
    fn test_other_errors_are_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_report.xlsx");
        let mut attempts = 0;

        let result = write_with(&path, b"data", 42, |_, _| {
            attempts += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        });

        assert!(result.is_err());
        assert_eq!(attempts, 1);
    }
}
