mod error;
mod volatile;

pub use error::MountError;
pub use nix::errno::Errno;
pub use nix::mount::MsFlags;
pub use volatile::{Mounter, SyscallMounter, mount, unmount};

/// How to mount one kind of volatile filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    pub fs_type: String,
    pub source: String,
    pub flags: MsFlags,
    pub options: Vec<String>,
}

impl MountSpec {
    pub fn new(fs_type: &str, source: &str, flags: MsFlags, options: Vec<String>) -> Self {
        Self {
            fs_type: fs_type.to_string(),
            source: source.to_string(),
            flags,
            options,
        }
    }

    /// POSIX message queue filesystem.
    pub fn mqueue() -> Self {
        Self::new("mqueue", "mqueue", hardened_flags(), Vec::new())
    }

    /// Shared memory tmpfs, world writable with the sticky bit, capped at 64MiB.
    pub fn shm() -> Self {
        Self::new(
            "tmpfs",
            "tmpfs",
            hardened_flags(),
            vec!["mode=1777".to_string(), "size=65536k".to_string()],
        )
    }

    /// The data argument passed to mount(2), `None` when there are no options.
    pub fn data(&self) -> Option<String> {
        if self.options.is_empty() {
            None
        } else {
            Some(self.options.join(","))
        }
    }
}

fn hardened_flags() -> MsFlags {
    MsFlags::MS_NODEV | MsFlags::MS_NOSUID | MsFlags::MS_NOEXEC
}
