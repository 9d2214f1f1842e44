//! Scoped exclusive lock over an output file

use std::io;

use tracing::warn;

use super::directory::OutputFile;

/// Holds the lock on an [`OutputFile`] and releases it when dropped
pub struct FileLock<'a> {
    file: &'a mut dyn OutputFile,
}

impl<'a> FileLock<'a> {
    /// Lock `file`, blocking or failing as the storage layer does
    pub fn acquire(file: &'a mut dyn OutputFile) -> io::Result<Self> {
        file.lock()?;
        Ok(Self { file })
    }

    pub fn write(&mut self, content: &str) -> io::Result<()> {
        self.file.write(content)
    }
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!("Failed to release output file lock: {}", e);
        }
    }
}
