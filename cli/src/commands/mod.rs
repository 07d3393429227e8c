mod driver;
mod layer;

pub use driver::{DriverCommands, handle_driver_command};
pub use layer::{LayerCommands, handle_layer_command};
