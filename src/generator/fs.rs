use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of [`FileSystem::ensure_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirOutcome {
    Created,
    Existed,
}

/// Result of [`FileSystem::write_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Created,
    Overwritten,
    /// The file existed and overwriting was not allowed
    Skipped,
}

/// Where generated output goes.
pub trait FileSystem {
    /// Create `path` and its parents. Succeeds when it already exists.
    fn ensure_dir(&mut self, path: &Path) -> io::Result<DirOutcome>;

    /// Write `contents` to `path`. An existing file is replaced only when
    /// `overwrite` is set.
    fn write_file(&mut self, path: &Path, contents: &str, overwrite: bool)
        -> io::Result<WriteOutcome>;
}

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn ensure_dir(&mut self, path: &Path) -> io::Result<DirOutcome> {
        if path.is_dir() {
            return Ok(DirOutcome::Existed);
        }
        fs::create_dir_all(path)?;
        Ok(DirOutcome::Created)
    }

    fn write_file(
        &mut self,
        path: &Path,
        contents: &str,
        overwrite: bool,
    ) -> io::Result<WriteOutcome> {
        let existed = path.exists();
        if existed && !overwrite {
            return Ok(WriteOutcome::Skipped);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(if existed {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        })
    }
}

/// Records what would be written without touching the disk.
///
/// Existing files and directories are looked up on the real disk, so the
/// reported outcomes match what [`LocalFs`] would do.
#[derive(Debug, Default)]
pub struct DryRunFs {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

impl DryRunFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories that would have been created.
    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    /// Files that would have been written, with their contents.
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn contents(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }
}

impl FileSystem for DryRunFs {
    fn ensure_dir(&mut self, path: &Path) -> io::Result<DirOutcome> {
        if path.is_dir() || self.dirs.contains(path) {
            return Ok(DirOutcome::Existed);
        }
        self.dirs.insert(path.to_path_buf());
        Ok(DirOutcome::Created)
    }

    fn write_file(
        &mut self,
        path: &Path,
        contents: &str,
        overwrite: bool,
    ) -> io::Result<WriteOutcome> {
        let existed = path.exists() || self.files.contains_key(path);
        if existed && !overwrite {
            return Ok(WriteOutcome::Skipped);
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(if existed {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        })
    }
}
