use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use volmount_mount::{Errno, MountError, MountSpec, Mounter};

/// Records mount calls instead of issuing them.
#[derive(Clone, Default)]
pub struct FakeMounter {
    state: Arc<FakeState>,
}

#[derive(Default)]
struct FakeState {
    mounts: AtomicUsize,
    unmounts: AtomicUsize,
    fail_mounts: AtomicBool,
    fail_unmounts: AtomicBool,
    delay_ms: AtomicU64,
    last_spec: Mutex<Option<MountSpec>>,
    // Stacked mounts per path, and the highest stack depth seen.
    table: Mutex<HashMap<PathBuf, usize>>,
    max_overlapping: AtomicUsize,
}

impl FakeMounter {
    pub fn mounts(&self) -> usize {
        self.state.mounts.load(Ordering::SeqCst)
    }

    pub fn unmounts(&self) -> usize {
        self.state.unmounts.load(Ordering::SeqCst)
    }

    pub fn fail_mounts(&self, fail: bool) {
        self.state.fail_mounts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_unmounts(&self, fail: bool) {
        self.state.fail_unmounts.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay_ms(&self, ms: u64) {
        self.state.delay_ms.store(ms, Ordering::SeqCst);
    }

    pub fn last_spec(&self) -> Option<MountSpec> {
        self.state.last_spec.lock().clone()
    }

    pub fn mounted_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.state.table.lock().keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn max_overlapping(&self) -> usize {
        self.state.max_overlapping.load(Ordering::SeqCst)
    }

    fn pause(&self) {
        let ms = self.state.delay_ms.load(Ordering::SeqCst);
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

impl Mounter for FakeMounter {
    fn mount(&self, spec: &MountSpec, target: &Path) -> Result<(), MountError> {
        self.pause();
        if self.state.fail_mounts.load(Ordering::SeqCst) {
            return Err(MountError::MountFailed {
                fs_type: spec.fs_type.clone(),
                target: target.to_path_buf(),
                errno: Errno::EPERM,
            });
        }

        self.state.mounts.fetch_add(1, Ordering::SeqCst);
        *self.state.last_spec.lock() = Some(spec.clone());

        let mut table = self.state.table.lock();
        let depth = table.entry(target.to_path_buf()).or_insert(0);
        *depth += 1;
        self.state.max_overlapping.fetch_max(*depth, Ordering::SeqCst);
        Ok(())
    }

    fn unmount(&self, target: &Path) -> Result<(), MountError> {
        self.pause();
        if self.state.fail_unmounts.load(Ordering::SeqCst) {
            return Err(MountError::UnmountFailed {
                target: target.to_path_buf(),
                errno: Errno::EBUSY,
            });
        }

        let mut table = self.state.table.lock();
        let Some(depth) = table.get_mut(target) else {
            return Err(MountError::UnmountFailed {
                target: target.to_path_buf(),
                errno: Errno::EINVAL,
            });
        };
        *depth -= 1;
        if *depth == 0 {
            table.remove(target);
        }

        self.state.unmounts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
