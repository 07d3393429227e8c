mod commands;

use clap::{Parser, Subcommand};
use commands::{DriverCommands, LayerCommands, handle_driver_command, handle_layer_command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use volmount_driver::DriverRegistry;

#[derive(Parser)]
#[command(name = "volmount")]
#[command(about = "Manage refcounted mqueue and shm mount points for container layers")]
struct Cli {
    /// Driver home directory
    #[arg(long, global = true, env = "VOLMOUNT_ROOT", default_value = "/var/lib/volmount")]
    root: PathBuf,

    /// Driver to use
    #[arg(long, global = true, env = "VOLMOUNT_DRIVER", default_value = "shm")]
    driver: String,

    /// Driver option, may be repeated
    #[arg(long = "opt", global = true)]
    options: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available drivers
    Drivers,
    #[command(flatten)]
    Driver(DriverCommands),
    #[command(flatten)]
    Layer(LayerCommands),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = DriverRegistry::with_builtin();

    match cli.command {
        Commands::Drivers => {
            for name in registry.names() {
                println!("{}", name);
            }
        }
        Commands::Driver(cmd) => {
            let driver = registry.init(&cli.driver, &cli.root, &cli.options)?;
            handle_driver_command(driver.as_ref(), cmd)?;
        }
        Commands::Layer(cmd) => {
            let driver = registry.init(&cli.driver, &cli.root, &cli.options)?;
            handle_layer_command(driver.as_ref(), cmd)?;
        }
    }

    Ok(())
}
