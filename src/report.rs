//! Output artifact handling: write, verify, and open the rendered map.

use crate::map::MapDocument;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Write/verification failures. Terminal for a run; no retry.
#[derive(Debug)]
pub enum ReportError {
    Write(PathBuf, io::Error),
    Missing(PathBuf),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(path, e) => {
                write!(f, "Cannot write map file '{}': {}", path.display(), e)
            }
            Self::Missing(path) => {
                write!(f, "Map file '{}' was not created", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {}

/// A verified on-disk artifact: absolute path and read-back byte size.
#[derive(Debug, Clone)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Persist the document, then verify it exists and read back its size.
/// Overwrites silently, so re-running with identical inputs is idempotent.
pub fn write_map(doc: &MapDocument, path: &Path) -> Result<WrittenArtifact, ReportError> {
    fs::write(path, doc.as_bytes()).map_err(|e| ReportError::Write(path.to_path_buf(), e))?;

    let meta = fs::metadata(path).map_err(|_| ReportError::Missing(path.to_path_buf()))?;
    let abs = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    Ok(WrittenArtifact {
        path: abs,
        bytes: meta.len(),
    })
}

/// Capability for handing an artifact to the host's default viewer.
/// Failure here never affects the reported outcome of the run.
pub trait ArtifactOpener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opens files through the platform's default handler, spawn-and-forget.
pub struct SystemOpener;

impl ArtifactOpener for SystemOpener {
    #[cfg(target_os = "windows")]
    fn open(&self, path: &Path) -> io::Result<()> {
        Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()
            .map(|_| ())
    }

    #[cfg(target_os = "macos")]
    fn open(&self, path: &Path) -> io::Result<()> {
        Command::new("open").arg(path).spawn().map(|_| ())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn open(&self, path: &Path) -> io::Result<()> {
        Command::new("xdg-open").arg(path).spawn().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{self, MapInputs};
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn sample_doc() -> MapDocument {
        map::render(&MapInputs {
            lat: 51.5074,
            lon: -0.1278,
            general_area: "London",
            precise_location: "London, Greater London, United Kingdom",
            carrier: "Unknown carrier",
            local_time: "2026-08-07 02:00:00 PM",
            timezone: "Europe/London",
        })
    }

    #[test]
    fn test_write_and_verify() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.html");
        let doc = sample_doc();

        let artifact = write_map(&doc, &path).unwrap();
        assert_eq!(artifact.bytes, doc.as_bytes().len() as u64);
        assert!(artifact.path.is_absolute());
        assert!(artifact.path.exists());
    }

    #[test]
    fn test_overwrite_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.html");
        let doc = sample_doc();

        let first = write_map(&doc, &path).unwrap();
        let second = write_map(&doc, &path).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("map.html");
        assert!(write_map(&sample_doc(), &path).is_err());
    }

    struct RecordingOpener(RefCell<Vec<PathBuf>>);

    impl ArtifactOpener for RecordingOpener {
        fn open(&self, path: &Path) -> io::Result<()> {
            self.0.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    struct FailingOpener;

    impl ArtifactOpener for FailingOpener {
        fn open(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no handler"))
        }
    }

    #[test]
    fn test_opener_capability() {
        let opener = RecordingOpener(RefCell::new(Vec::new()));
        opener.open(Path::new("/tmp/map.html")).unwrap();
        assert_eq!(opener.0.borrow().len(), 1);

        // An opener failure is just a value; nothing panics or aborts.
        assert!(FailingOpener.open(Path::new("/tmp/map.html")).is_err());
    }
}
