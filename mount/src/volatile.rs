use crate::MountSpec;
use crate::error::MountError;
use nix::mount::{MntFlags, mount as sys_mount, umount2};
use std::path::Path;

/// Performs the physical mount and unmount of a [`MountSpec`].
///
/// The lifecycle code only talks to this trait, so bookkeeping can be
/// exercised without CAP_SYS_ADMIN.
pub trait Mounter: Send + Sync {
    fn mount(&self, spec: &MountSpec, target: &Path) -> Result<(), MountError>;

    fn unmount(&self, target: &Path) -> Result<(), MountError>;
}

/// [`Mounter`] backed by the mount(2) and umount2(2) syscalls.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyscallMounter;

impl Mounter for SyscallMounter {
    fn mount(&self, spec: &MountSpec, target: &Path) -> Result<(), MountError> {
        mount(spec, target)
    }

    fn unmount(&self, target: &Path) -> Result<(), MountError> {
        unmount(target)
    }
}

/// Mount the filesystem described by `spec` on `target`.
///
/// The target directory must already exist.
pub fn mount(spec: &MountSpec, target: &Path) -> Result<(), MountError> {
    if spec.fs_type.is_empty() {
        return Err(MountError::InvalidSpec("empty filesystem type".to_string()));
    }

    let data = spec.data();

    tracing::info!(
        "Mounting {} at {:?} with flags {:?}, options: {}",
        spec.fs_type,
        target,
        spec.flags,
        data.as_deref().unwrap_or("")
    );

    sys_mount(
        Some(spec.source.as_str()),
        target,
        Some(spec.fs_type.as_str()),
        spec.flags,
        data.as_deref(),
    )
    .map_err(|errno| MountError::MountFailed {
        fs_type: spec.fs_type.clone(),
        target: target.to_path_buf(),
        errno,
    })?;

    tracing::info!("Mounted {} filesystem at {:?}", spec.fs_type, target);
    Ok(())
}

/// Unmount the filesystem at the given path.
///
/// No lazy detach: a busy mount point is reported rather than hidden.
pub fn unmount(target: &Path) -> Result<(), MountError> {
    tracing::debug!("Unmounting {:?}", target);

    umount2(target, MntFlags::empty()).map_err(|errno| MountError::UnmountFailed {
        target: target.to_path_buf(),
        errno,
    })?;

    tracing::info!("Unmounted {:?}", target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::mount::MsFlags;

    #[test]
    fn test_shm_spec() {
        let spec = MountSpec::shm();

        assert_eq!(spec.fs_type, "tmpfs");
        assert_eq!(spec.source, "tmpfs");
        assert_eq!(spec.data().as_deref(), Some("mode=1777,size=65536k"));
        assert!(spec.flags.contains(MsFlags::MS_NODEV | MsFlags::MS_NOSUID | MsFlags::MS_NOEXEC));
    }

    #[test]
    fn test_mqueue_spec() {
        let spec = MountSpec::mqueue();

        assert_eq!(spec.fs_type, "mqueue");
        assert_eq!(spec.source, "mqueue");
        assert_eq!(spec.data(), None);
        assert_eq!(spec.flags, MountSpec::shm().flags);
    }

    #[test]
    fn test_empty_fs_type_rejected() {
        let spec = MountSpec::new("", "none", MsFlags::empty(), vec![]);
        let err = mount(&spec, Path::new("/nonexistent")).unwrap_err();

        assert!(matches!(err, MountError::InvalidSpec(_)));
        assert!(err.errno().is_none());
    }
}
