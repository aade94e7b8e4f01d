//! Archive unpacking into a per-run working directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// A per-run working directory holding the unpacked archive.
///
/// The directory is uniquely named, so concurrent runs never collide, and it
/// is removed on drop on every exit path. Callers that want to inspect the
/// extracted files keep the `Workdir` alive for as long as they need it.
#[derive(Debug)]
pub struct Workdir {
    dir: TempDir,
}

impl Workdir {
    /// Root of the unpacked archive tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The `extracted/` subdirectory where accepted chapters are persisted.
    /// Created on first call.
    pub fn extracted_dir(&self) -> Result<PathBuf> {
        let dir = self.dir.path().join("extracted");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Unpack an EPUB (ZIP) archive into a fresh [`Workdir`].
///
/// Fails with [`Error::Archive`] when the file is unreadable or not a valid
/// ZIP package.
pub fn unpack<P: AsRef<Path>>(path: P) -> Result<Workdir> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::Archive(format!("cannot open {}: {}", path.display(), e)))?;

    let mut archive =
        ZipArchive::new(file).map_err(|e| Error::Archive(format!("not a ZIP archive: {}", e)))?;

    let dir = TempDir::with_prefix("booksum-")?;
    archive
        .extract(dir.path())
        .map_err(|e| Error::Archive(format!("failed to extract archive: {}", e)))?;

    Ok(Workdir { dir })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_unpack_rejects_non_zip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();

        let result = unpack(file.path());
        assert!(matches!(result, Err(Error::Archive(_))));
    }

    #[test]
    fn test_unpack_rejects_missing_file() {
        let result = unpack("/nonexistent/book.epub");
        assert!(matches!(result, Err(Error::Archive(_))));
    }

    #[test]
    fn test_workdir_removed_on_drop() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        {
            let mut zip = zip::ZipWriter::new(&mut file);
            zip.start_file("mimetype", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"application/epub+zip").unwrap();
            zip.finish().unwrap();
        }

        let workdir = unpack(file.path()).unwrap();
        let root = workdir.path().to_path_buf();
        assert!(root.join("mimetype").exists());

        drop(workdir);
        assert!(!root.exists());
    }
}
