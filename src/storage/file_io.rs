//! JSON persistence helpers
//!
//! Store files are replaced whole: a new copy is written beside the target
//! and moved over it once it is on disk, so readers see either the old file
//! or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::TimesheetError;

/// Load a JSON document, or `T::default()` when the file is absent
pub fn read_json<T, P>(path: P) -> Result<T, TimesheetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        TimesheetError::Storage(format!("Cannot open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        TimesheetError::Storage(format!("Malformed store file {}: {}", path.display(), e))
    })
}

/// Replace `path` with the pretty-printed JSON form of `data`
///
/// The staging file gets a unique name in the target's directory and is
/// deleted if any step before the final move fails.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TimesheetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|e| {
        TimesheetError::Storage(format!("Cannot create {}: {}", dir.display(), e))
    })?;

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| {
        TimesheetError::Storage(format!("Cannot stage write in {}: {}", dir.display(), e))
    })?;

    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, data).map_err(|e| {
            TimesheetError::Storage(format!("Cannot encode {}: {}", path.display(), e))
        })?;
        writer.flush().map_err(|e| {
            TimesheetError::Storage(format!("Cannot write {}: {}", path.display(), e))
        })?;
    }
    staged.as_file().sync_all().map_err(|e| {
        TimesheetError::Storage(format!("Cannot sync {}: {}", path.display(), e))
    })?;

    staged.persist(path).map_err(|e| {
        TimesheetError::Storage(format!("Cannot replace {}: {}", path.display(), e.error))
    })?;

    Ok(())
}
