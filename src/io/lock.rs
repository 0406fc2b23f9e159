use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Advisory file lock serializing writes to the plan directory.
///
/// Uses platform-native flock (Unix) to coordinate between the TUI and
/// CLI processes. Released on drop.
pub struct PlanLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another dp process may be writing")]
    Timeout { path: PathBuf },
}

impl PlanLock {
    /// Acquire the lock, waiting up to `timeout` for a concurrent holder.
    pub fn acquire(plan_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = plan_dir.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::Create {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        while try_lock(&file).is_err() {
            if start.elapsed() >= timeout {
                return Err(LockError::Timeout { path: lock_path });
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        Ok(PlanLock {
            _file: file,
            path: lock_path,
        })
    }

    pub fn acquire_default(plan_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(plan_dir, DEFAULT_TIMEOUT)
    }
}

impl Drop for PlanLock {
    fn drop(&mut self) {
        // flock is released when the file closes; the file itself is cosmetic
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let ret = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if ret == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}
