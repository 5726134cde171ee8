use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::error::{Result, TaskqError};

/// Take an exclusive, non-blocking lock on `path`, creating it if needed.
/// The lock is held until the returned File is dropped.
pub fn acquire_lock(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    file.try_lock_exclusive()
        .map_err(|_| TaskqError::Locked(path.display().to_string()))?;

    Ok(file)
}
