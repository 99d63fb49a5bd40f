//! # File I/O Module
//!
//! Handles sketch file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Sketches are saved as `.sketch` files containing JSON.
//! Lock files use `.sketch.lock` extension with metadata about who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use studio_core::file_io::{save_sketch, load_sketch, FileLock};
//! use studio_core::sketch::Sketch;
//! use std::path::Path;
//!
//! let sketch = Sketch::new("Warehouse bay");
//! let path = Path::new("bay.sketch");
//!
//! // Acquire lock before saving
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//!
//! // Save with atomic write
//! save_sketch(&sketch, path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{StudioError, StudioResult};
use crate::sketch::{Sketch, SCHEMA_VERSION};

/// Conventional extension for sketch files
pub const SKETCH_EXTENSION: &str = "sketch";

/// Lock file metadata stored in .sketch.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

fn hostname() -> Option<String> {
    whoami::fallible::hostname().ok().filter(|h| !h.is_empty())
}

/// File lock guard that releases the lock when dropped.
///
/// Holds an OS-level lock (via fs2) and writes a `.lock` sidecar with
/// metadata so other users can see who has the sketch open.
pub struct FileLock {
    sketch_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a sketch file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(StudioError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> StudioResult<Self> {
        let lock_path = with_suffix(path, "lock");
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(StudioError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                warn!(path = %lock_path.display(), holder = %existing.user_id, "taking over stale lock");
            }
        }

        // The holder's metadata is only cleared once we own the OS lock.
        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| StudioError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            StudioError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        lock_file
            .set_len(0)
            .map_err(|e| StudioError::file_error("reset lock", lock_path.display().to_string(), e.to_string()))?;

        let lock_json = serde_json::to_string_pretty(&info)?;

        lock_file
            .write_all(lock_json.as_bytes())
            .map_err(|e| StudioError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file
            .sync_all()
            .map_err(|e| StudioError::file_error("sync lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), user = %info.user_id, "sketch lock acquired");

        Ok(FileLock {
            sketch_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = with_suffix(path, "lock");
        read_lock_info(&lock_path).ok().filter(|info| !is_lock_stale(info))
    }

    pub fn sketch_path(&self) -> &Path {
        &self.sketch_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // OS lock is released when _lock_file is dropped
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `bay.sketch` -> `bay.sketch.<suffix>`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    out.set_extension(extension);
    out
}

fn read_lock_info(lock_path: &Path) -> StudioResult<LockInfo> {
    let contents = fs::read_to_string(lock_path)
        .map_err(|e| StudioError::file_error("read lock", lock_path.display().to_string(), e.to_string()))?;
    Ok(serde_json::from_str(&contents)?)
}

/// A lock is stale when its process is gone (same machine) or it is more
/// than 24 hours old.
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    (Utc::now() - info.locked_at).num_hours() > 24
}

/// Save a sketch with atomic write semantics.
///
/// The JSON is written to `<path>.tmp`, synced, then renamed over `path`,
/// so an interrupted save never leaves a truncated sketch behind.
pub fn save_sketch(sketch: &Sketch, path: &Path) -> StudioResult<()> {
    let json = serde_json::to_string_pretty(sketch)?;
    let tmp_path = with_suffix(path, "tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| StudioError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| StudioError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| StudioError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StudioError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(
        path = %path.display(),
        components = sketch.components.len(),
        materials = sketch.materials.len(),
        "sketch saved"
    );
    Ok(())
}

/// Load a sketch from a file.
///
/// # Returns
///
/// * `Ok(Sketch)` - Successfully loaded sketch
/// * `Err(StudioError::VersionMismatch)` - File version is incompatible
/// * `Err(StudioError::SerializationError)` - Invalid JSON
/// * `Err(StudioError::FileError)` - I/O error
pub fn load_sketch(path: &Path) -> StudioResult<Sketch> {
    let contents = fs::read_to_string(path)
        .map_err(|e| StudioError::file_error("read", path.display().to_string(), e.to_string()))?;

    let sketch: Sketch = serde_json::from_str(&contents).map_err(|e| StudioError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&sketch.meta.version)?;

    debug!(path = %path.display(), components = sketch.components.len(), "sketch loaded");
    Ok(sketch)
}

/// Load a sketch, also reporting whether someone else holds its lock.
pub fn load_sketch_with_lock_check(path: &Path) -> StudioResult<(Sketch, Option<LockInfo>)> {
    let sketch = load_sketch(path)?;
    let lock_info = FileLock::check(path);
    Ok((sketch, lock_info))
}

/// Major version must match; while on 0.x a newer minor is rejected.
fn validate_version(file_version: &str) -> StudioResult<()> {
    let mismatch = || StudioError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
