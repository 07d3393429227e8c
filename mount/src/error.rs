use nix::errno::Errno;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MountError {
    #[error("{fs_type} mount at {target:?} failed: {errno}")]
    MountFailed {
        fs_type: String,
        target: PathBuf,
        errno: Errno,
    },

    #[error("unmount of {target:?} failed: {errno}")]
    UnmountFailed { target: PathBuf, errno: Errno },

    #[error("invalid mount specification: {0}")]
    InvalidSpec(String),
}

impl MountError {
    /// The OS error behind a failed syscall, if any.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            MountError::MountFailed { errno, .. } | MountError::UnmountFailed { errno, .. } => {
                Some(*errno)
            }
            _ => None,
        }
    }
}
