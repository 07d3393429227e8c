use crate::driver::{Driver, MountDriver, Variant};
use crate::error::DriverError;
use std::collections::BTreeMap;
use std::path::Path;

/// Builds a driver rooted at the given home directory.
pub type InitFn = fn(&Path, &[String]) -> Result<Box<dyn Driver>, DriverError>;

/// Name to factory lookup, populated by whoever composes the drivers.
#[derive(Default)]
pub struct DriverRegistry {
    drivers: BTreeMap<String, InitFn>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the mqueue and shm drivers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.drivers.insert(Variant::Mqueue.name().to_string(), init_mqueue);
        registry.drivers.insert(Variant::Shm.name().to_string(), init_shm);
        registry
    }

    pub fn register(&mut self, name: &str, init: InitFn) -> Result<(), DriverError> {
        if self.drivers.contains_key(name) {
            return Err(DriverError::AlreadyRegistered(name.to_string()));
        }
        self.drivers.insert(name.to_string(), init);
        Ok(())
    }

    pub fn init(
        &self,
        name: &str,
        root: &Path,
        options: &[String],
    ) -> Result<Box<dyn Driver>, DriverError> {
        let init = self
            .drivers
            .get(name)
            .ok_or_else(|| DriverError::UnknownDriver(name.to_string()))?;
        init(root, options)
    }

    pub fn names(&self) -> Vec<&str> {
        self.drivers.keys().map(String::as_str).collect()
    }
}

pub fn init_mqueue(root: &Path, options: &[String]) -> Result<Box<dyn Driver>, DriverError> {
    Ok(Box::new(MountDriver::init(Variant::Mqueue, root, options)?))
}

pub fn init_shm(root: &Path, options: &[String]) -> Result<Box<dyn Driver>, DriverError> {
    Ok(Box::new(MountDriver::init(Variant::Shm, root, options)?))
}
