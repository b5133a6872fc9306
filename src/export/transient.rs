//! Transient export files
//!
//! A [`TransientFile`] stages export bytes on disk between rendering and
//! transmission. It is owned by exactly one export call and removed either
//! by an explicit [`TransientFile::release`] or, failing that, on drop.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Upper bound on the human-readable part of a staged file name
const MAX_PREFIX_LEN: usize = 48;

/// A uniquely named file inside the shared transient directory
#[derive(Debug)]
pub struct TransientFile {
    inner: Option<NamedTempFile>,
    path: PathBuf,
}

impl TransientFile {
    /// Create a new, empty transient file in `dir`
    ///
    /// The directory is created if missing; concurrent callers racing to
    /// create it all succeed. The file name is `<prefix>-<random><suffix>`, so
    /// concurrent exports never collide.
    pub fn create_in(dir: &Path, prefix: &str, suffix: &str) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;

        let prefix: String = prefix.chars().take(MAX_PREFIX_LEN).collect();
        let file = tempfile::Builder::new()
            .prefix(&format!("{}-", prefix))
            .suffix(suffix)
            .tempfile_in(dir)?;

        let path = file.path().to_path_buf();
        debug!(path = %path.display(), "created transient export file");

        Ok(Self {
            inner: Some(file),
            path,
        })
    }

    /// Location of the staged file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writable handle for staging content
    pub fn as_file_mut(&mut self) -> io::Result<&mut File> {
        self.inner
            .as_mut()
            .map(|f| f.as_file_mut())
            .ok_or_else(released)
    }

    /// Copy the staged bytes into `sink`, returning the number of bytes copied
    ///
    /// Reads through the handle opened at creation, so the bytes are still
    /// delivered if the path was unlinked in the meantime.
    pub fn stream_to<W: Write>(&self, sink: &mut W) -> io::Result<u64> {
        let file = self.inner.as_ref().ok_or_else(released)?;
        let mut reader: &File = file.as_file();
        reader.seek(SeekFrom::Start(0))?;
        let copied = io::copy(&mut reader, sink)?;
        sink.flush()?;
        Ok(copied)
    }

    /// Delete the staged file now
    ///
    /// Calling this more than once is harmless; later calls are no-ops.
    pub fn release(&mut self) -> io::Result<()> {
        match self.inner.take() {
            Some(file) => {
                file.close()?;
                debug!(path = %self.path.display(), "removed transient export file");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove transient export file"
            );
        }
    }
}

fn released() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "transient file already released")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[test]
    fn test_create_makes_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("tmp").join("exports");

        let file = TransientFile::create_in(&dir, "acme-report", ".csv").unwrap();
        assert!(dir.is_dir());
        assert!(file.path().starts_with(&dir));

        let name = file.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("acme-report-"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_names_are_unique() {
        let temp_dir = TempDir::new().unwrap();
        let a = TransientFile::create_in(temp_dir.path(), "same", ".csv").unwrap();
        let b = TransientFile::create_in(temp_dir.path(), "same", ".csv").unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(file_count(temp_dir.path()), 2);
    }

    #[test]
    fn test_stream_then_release() {
        let temp_dir = TempDir::new().unwrap();
        let mut file = TransientFile::create_in(temp_dir.path(), "x", ".csv").unwrap();
        file.as_file_mut().unwrap().write_all(b"a,b\n1,2\n").unwrap();

        let mut sink = Vec::new();
        assert_eq!(file.stream_to(&mut sink).unwrap(), 8);
        assert_eq!(sink, b"a,b\n1,2\n");

        file.release().unwrap();
        file.release().unwrap();
        assert_eq!(file_count(temp_dir.path()), 0);
        assert!(file.stream_to(&mut Vec::new()).is_err());
    }

    #[test]
    fn test_drop_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        {
            let _file = TransientFile::create_in(temp_dir.path(), "x", ".csv").unwrap();
            assert_eq!(file_count(temp_dir.path()), 1);
        }
        assert_eq!(file_count(temp_dir.path()), 0);
    }

    #[test]
    fn test_release_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut file = TransientFile::create_in(temp_dir.path(), "x", ".csv").unwrap();
        std::fs::remove_file(file.path()).unwrap();

        assert!(file.release().is_err());
        // Already taken, so drop has nothing left to do
        drop(file);
    }
}
