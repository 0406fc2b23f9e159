//! Atomic blob writes and the append-only recovery log.
//!
//! A failed blob write would otherwise lose the in-memory state that was
//! about to land; the log keeps the serialized payload so it can be
//! restored by hand.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;

pub const RECOVERY_LOG: &str = ".recovery.log";

/// Write `bytes` to `path` via a temp file in the same directory plus an
/// atomic rename, so readers never observe a half-written blob.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no parent")
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append a failed-write entry (timestamp, target, error, payload) to the
/// recovery log. Best-effort: a log failure is swallowed since there is
/// nowhere left to report it.
pub fn log_write_failure(plan_dir: &Path, target: &str, error: &std::io::Error, payload: &str) {
    let log_path = plan_dir.join(RECOVERY_LOG);
    let entry = format!(
        "=== {} ===\ntarget: {}\nerror: {}\n--- payload ---\n{}\n\n",
        Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
        target,
        error,
        payload,
    );
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = file.write_all(entry.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_and_replaces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blob.json");

        atomic_write(&path, b"[1]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1]");

        atomic_write(&path, b"[1,2]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2]");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blob.json");
        atomic_write(&path, b"{}").unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_log_write_failure_appends() {
        let tmp = TempDir::new().unwrap();
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        log_write_failure(tmp.path(), "tasks.json", &err, "[]");
        log_write_failure(tmp.path(), "memos.json", &err, "{}");

        let log = fs::read_to_string(tmp.path().join(RECOVERY_LOG)).unwrap();
        assert!(log.contains("target: tasks.json"));
        assert!(log.contains("target: memos.json"));
        assert!(log.contains("denied"));
    }
}
