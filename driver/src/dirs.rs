use crate::error::DriverError;
use std::fs::{self, DirBuilder};
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

const DIRS_DIR: &str = "dir";

/// Maps layer ids to mount point directories under `<root>/dir`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for `id`. Only the last path component of the id is used,
    /// so the result always sits directly under `<root>/dir`.
    pub fn resolve(&self, id: &str) -> Result<PathBuf, DriverError> {
        let name = basename(id);
        if name.is_empty() || name == "." || name == ".." {
            return Err(DriverError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(DIRS_DIR).join(name))
    }

    /// Create the directory for `id`, owner-only. Succeeds if it already exists.
    pub fn create(&self, id: &str) -> Result<PathBuf, DriverError> {
        let dir = self.resolve(id)?;
        DirBuilder::new().recursive(true).mode(0o700).create(&dir)?;
        Ok(dir)
    }

    /// Recursively delete the directory for `id`, mounted or not.
    pub fn remove(&self, id: &str) -> Result<(), DriverError> {
        let dir = self.resolve(id)?;
        if !dir.try_exists()? {
            return Err(DriverError::NotFound(dir));
        }
        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    pub fn exists(&self, id: &str) -> bool {
        self.resolve(id).map(|dir| dir.exists()).unwrap_or(false)
    }
}

fn basename(id: &str) -> &str {
    let trimmed = id.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
