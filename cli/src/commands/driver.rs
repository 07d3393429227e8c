use clap::Subcommand;
use volmount_driver::{Driver, DriverError};

#[derive(Subcommand)]
pub enum DriverCommands {
    /// Show driver status
    Status,
    /// Release driver resources
    Cleanup,
}

pub fn handle_driver_command(driver: &dyn Driver, cmd: DriverCommands) -> Result<(), DriverError> {
    match cmd {
        DriverCommands::Status => {
            let status = driver.status();
            println!("Driver: {}", driver.name());
            for (key, value) in status {
                println!("{}: {}", key, value);
            }
        }
        DriverCommands::Cleanup => {
            driver.cleanup()?;
            tracing::info!("{} driver cleaned up", driver.name());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use volmount_driver::DriverRegistry;

    #[test]
    fn test_status_and_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let registry = DriverRegistry::with_builtin();

        for name in registry.names() {
            let driver = registry.init(name, temp_dir.path(), &[]).unwrap();
            handle_driver_command(driver.as_ref(), DriverCommands::Status).unwrap();
            handle_driver_command(driver.as_ref(), DriverCommands::Cleanup).unwrap();
        }
    }
}
