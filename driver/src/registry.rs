use crate::dirs::DirectoryStore;
use crate::error::DriverError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;
use volmount_mount::{MountSpec, Mounter};

#[derive(Debug)]
struct ActiveMount {
    count: usize,
    path: PathBuf,
    mounted: bool,
}

/// Refcounted mounts for one driver instance.
///
/// A single lock covers every id and is held across the mount and unmount
/// syscalls, so each id sees strictly ordered mount sessions: the first
/// acquire mounts, the last release unmounts, and nothing in between touches
/// the mount table.
///
/// A record is dropped when its count reaches zero even if the unmount
/// fails. The next acquire then starts a fresh session and mounts again.
pub struct MountRegistry<M> {
    spec: MountSpec,
    mounter: M,
    active: Mutex<HashMap<String, ActiveMount>>,
}

impl<M: Mounter> MountRegistry<M> {
    pub fn new(spec: MountSpec, mounter: M) -> Self {
        Self {
            spec,
            mounter,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Take a reference on `id`, mounting its directory on the first one.
    ///
    /// A failed first acquire leaves no record behind.
    pub fn acquire(&self, id: &str, store: &DirectoryStore) -> Result<PathBuf, DriverError> {
        let mut active = self.active.lock();

        if let Some(mount) = active.get_mut(id) {
            mount.count += 1;
            tracing::debug!(id = %id, count = mount.count, "Reusing active mount");
            return Ok(mount.path.clone());
        }

        let dir = store.resolve(id)?;
        if !dir.exists() {
            return Err(DriverError::NotFound(dir));
        }

        self.mounter
            .mount(&self.spec, &dir)
            .map_err(|source| DriverError::MountFailed {
                path: dir.clone(),
                source,
            })?;

        active.insert(
            id.to_string(),
            ActiveMount {
                count: 1,
                path: dir.clone(),
                mounted: true,
            },
        );

        Ok(dir)
    }

    /// Drop a reference on `id`, unmounting when the last one goes away.
    ///
    /// Releasing an id with no outstanding acquire is a no-op.
    pub fn release(&self, id: &str) -> Result<(), DriverError> {
        let mut active = self.active.lock();

        let Entry::Occupied(mut entry) = active.entry(id.to_string()) else {
            tracing::debug!("Put on a non-mounted layer {}", id);
            return Ok(());
        };

        let mount = entry.get_mut();
        mount.count -= 1;
        if mount.count > 0 {
            tracing::debug!(id = %id, count = mount.count, "Released reference");
            return Ok(());
        }

        let mount = entry.remove();
        if mount.mounted {
            self.mounter.unmount(&mount.path).map_err(|source| {
                tracing::warn!("Failed to unmount {} {}: {}", id, self.spec.fs_type, source);
                DriverError::UnmountFailed {
                    id: id.to_string(),
                    source,
                }
            })?;
        }

        Ok(())
    }

    /// Outstanding acquires for `id`, `None` when it has no active record.
    pub fn refcount(&self, id: &str) -> Option<usize> {
        self.active.lock().get(id).map(|mount| mount.count)
    }

    /// Number of ids with an active record.
    pub fn active_count(&self) -> usize {
        self.active.lock().len()
    }
}
