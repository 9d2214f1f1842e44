//! Output directory and file handles

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Writable handle on a generated file.
///
/// Dropping the handle closes it.
pub trait OutputFile {
    /// Take an exclusive lock on the file
    fn lock(&mut self) -> io::Result<()>;

    /// Write `content` at the current position
    fn write(&mut self, content: &str) -> io::Result<()>;

    /// Release the lock taken by [`OutputFile::lock`]
    fn unlock(&mut self) -> io::Result<()>;
}

/// Directory that generated files are written into
pub trait OutputDirectory {
    /// Open `relative_path` for writing, creating it or truncating existing content
    fn open_file(&self, relative_path: &str) -> io::Result<Box<dyn OutputFile>>;
}

impl<D: OutputDirectory + ?Sized> OutputDirectory for &D {
    fn open_file(&self, relative_path: &str) -> io::Result<Box<dyn OutputFile>> {
        (**self).open_file(relative_path)
    }
}

/// Local directory for generated, non-permanent artifacts
#[derive(Debug, Clone)]
pub struct TmpDirectory {
    root: PathBuf,
}

impl TmpDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The process temp directory (`std::env::temp_dir`)
    pub fn system() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative_path` under the root.
    ///
    /// Absolute paths and `..` components are rejected so nothing is written
    /// outside the directory.
    pub fn resolve(&self, relative_path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(relative_path);
        if relative_path.is_empty() {
            return Err(invalid_path(relative_path, "path is empty"));
        }
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => {
                    return Err(invalid_path(relative_path, "path leaves the output directory"))
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid_path(relative_path, "path must be relative"))
                }
            }
        }
        Ok(self.root.join(relative))
    }
}

impl Default for TmpDirectory {
    fn default() -> Self {
        Self::system()
    }
}

impl OutputDirectory for TmpDirectory {
    fn open_file(&self, relative_path: &str) -> io::Result<Box<dyn OutputFile>> {
        let path = self.resolve(relative_path)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)?;
        debug!("Opened output file {}", path.display());

        Ok(Box::new(LocalFile { file, path }))
    }
}

fn invalid_path(path: &str, reason: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid output path '{}': {}", path, reason),
    )
}

/// File on the local filesystem, locked with `flock`/`LockFileEx`
struct LocalFile {
    file: File,
    path: PathBuf,
}

impl OutputFile for LocalFile {
    fn lock(&mut self) -> io::Result<()> {
        self.file.lock()
    }

    fn write(&mut self, content: &str) -> io::Result<()> {
        self.file.write_all(content.as_bytes())?;
        self.file.flush()
    }

    fn unlock(&mut self) -> io::Result<()> {
        self.file.unlock()
    }
}

impl Drop for LocalFile {
    fn drop(&mut self) {
        debug!("Closed output file {}", self.path.display());
    }
}
