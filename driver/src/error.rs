use std::path::PathBuf;
use thiserror::Error;
use volmount_mount::MountError;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("{driver} driver doesn't support parent: {parent}")]
    ParentNotSupported { driver: String, parent: String },

    #[error("layer directory not found: {0:?}")]
    NotFound(PathBuf),

    #[error("invalid layer id: {0:?}")]
    InvalidId(String),

    #[error("error creating mount at {path:?}: {source}")]
    MountFailed {
        path: PathBuf,
        #[source]
        source: MountError,
    },

    #[error("failed to unmount {id}: {source}")]
    UnmountFailed {
        id: String,
        #[source]
        source: MountError,
    },

    #[error("unknown driver: {0}")]
    UnknownDriver(String),

    #[error("driver already registered: {0}")]
    AlreadyRegistered(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
