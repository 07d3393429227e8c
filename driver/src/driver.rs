use crate::dirs::DirectoryStore;
use crate::error::DriverError;
use crate::registry::MountRegistry;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use volmount_mount::{MountSpec, Mounter, SyscallMounter};

/// The volatile filesystems a driver can manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Mqueue,
    Shm,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Mqueue, Variant::Shm];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Mqueue => "mqueue",
            Variant::Shm => "shm",
        }
    }

    pub fn mount_spec(self) -> MountSpec {
        match self {
            Variant::Mqueue => MountSpec::mqueue(),
            Variant::Shm => MountSpec::shm(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| DriverError::UnknownDriver(s.to_string()))
    }
}

/// Lifecycle of per-layer mount points, as seen by the layering code.
pub trait Driver: Send + Sync {
    fn name(&self) -> &'static str;

    /// Create the layer directory. Layers are flat, so `parent` must be empty.
    fn create(&self, id: &str, parent: &str) -> Result<(), DriverError>;

    /// Delete the layer directory, regardless of mount state.
    fn remove(&self, id: &str) -> Result<(), DriverError>;

    fn exists(&self, id: &str) -> bool;

    /// Acquire the layer and return its mount point. `mount_label` is ignored.
    fn get(&self, id: &str, mount_label: &str) -> Result<PathBuf, DriverError>;

    /// Release one acquire of the layer.
    fn put(&self, id: &str) -> Result<(), DriverError>;

    fn status(&self) -> Vec<(String, String)>;

    fn cleanup(&self) -> Result<(), DriverError>;
}

pub struct MountDriver<M = SyscallMounter> {
    variant: Variant,
    store: DirectoryStore,
    registry: MountRegistry<M>,
}

impl MountDriver {
    /// Driver factory. Options are accepted and ignored.
    pub fn init(
        variant: Variant,
        root: impl AsRef<Path>,
        options: &[String],
    ) -> Result<Self, DriverError> {
        if !options.is_empty() {
            tracing::debug!("Ignoring {} driver options: {:?}", variant, options);
        }
        Ok(Self::with_mounter(variant, root, SyscallMounter))
    }
}

impl<M: Mounter> MountDriver<M> {
    pub fn with_mounter(variant: Variant, root: impl AsRef<Path>, mounter: M) -> Self {
        let store = DirectoryStore::new(root);
        tracing::info!("Initializing {} driver at {:?}", variant, store.root());
        Self {
            variant,
            store,
            registry: MountRegistry::new(variant.mount_spec(), mounter),
        }
    }

    pub fn refcount(&self, id: &str) -> Option<usize> {
        self.registry.refcount(id)
    }
}

impl<M: Mounter> Driver for MountDriver<M> {
    fn name(&self) -> &'static str {
        self.variant.name()
    }

    fn create(&self, id: &str, parent: &str) -> Result<(), DriverError> {
        if !parent.is_empty() {
            return Err(DriverError::ParentNotSupported {
                driver: self.name().to_string(),
                parent: parent.to_string(),
            });
        }

        let dir = self.store.create(id)?;
        tracing::debug!("Created {} layer {} at {:?}", self.variant, id, dir);
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<(), DriverError> {
        self.store.remove(id)?;
        tracing::debug!("Removed {} layer {}", self.variant, id);
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        self.store.exists(id)
    }

    fn get(&self, id: &str, _mount_label: &str) -> Result<PathBuf, DriverError> {
        self.registry.acquire(id, &self.store)
    }

    fn put(&self, id: &str) -> Result<(), DriverError> {
        self.registry.release(id)
    }

    fn status(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn cleanup(&self) -> Result<(), DriverError> {
        Ok(())
    }
}

impl<M> fmt::Display for MountDriver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.variant.name())
    }
}
