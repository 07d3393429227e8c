use clap::Subcommand;
use std::io::{self, BufRead, Write};
use volmount_driver::{Driver, DriverError};

#[derive(Subcommand)]
pub enum LayerCommands {
    /// Create a layer directory
    Create {
        /// Layer ID
        id: String,

        /// Parent layer (not supported by volatile drivers)
        #[arg(long, default_value = "")]
        parent: String,
    },
    /// Remove a layer directory
    Remove {
        /// Layer ID
        id: String,
    },
    /// Check whether a layer directory exists
    Exists {
        /// Layer ID
        id: String,
    },
    /// Mount a layer and keep it mounted until stdin is closed or a line is read
    ///
    /// There is no signal handling: killing the process (including Ctrl-C)
    /// leaves the layer mounted.
    Hold {
        /// Layer ID
        id: String,

        /// Mount label (ignored by volatile drivers)
        #[arg(long, default_value = "")]
        mount_label: String,
    },
}

pub fn handle_layer_command(driver: &dyn Driver, cmd: LayerCommands) -> Result<(), DriverError> {
    match cmd {
        LayerCommands::Create { id, parent } => {
            driver.create(&id, &parent)?;
            println!("{}", id);
        }
        LayerCommands::Remove { id } => {
            driver.remove(&id)?;
            println!("{}", id);
        }
        LayerCommands::Exists { id } => {
            println!("{}", driver.exists(&id));
        }
        LayerCommands::Hold { id, mount_label } => {
            hold(driver, &id, &mount_label, io::stdin().lock(), io::stdout())?;
        }
    }

    Ok(())
}

fn hold(
    driver: &dyn Driver,
    id: &str,
    mount_label: &str,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<(), DriverError> {
    let path = driver.get(id, mount_label)?;

    let held = writeln!(output, "{}", path.display())
        .and_then(|()| output.flush())
        .and_then(|()| {
            let mut line = String::new();
            input.read_line(&mut line).map(|_| ())
        });

    // Release before surfacing an stdout or stdin error.
    driver.put(id)?;
    held?;
    Ok(())
}
