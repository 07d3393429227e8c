mod dirs;
mod driver;
mod error;
mod factory;
mod registry;
#[cfg(test)]
mod testing;

pub use dirs::DirectoryStore;
pub use driver::{Driver, MountDriver, Variant};
pub use error::DriverError;
pub use factory::{DriverRegistry, InitFn, init_mqueue, init_shm};
pub use registry::MountRegistry;
pub use volmount_mount::{MountSpec, Mounter, SyscallMounter};
