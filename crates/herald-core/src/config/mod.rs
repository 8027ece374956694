//! Dispatcher configuration

mod env_loader;
mod file_loader;
mod model;

pub use env_loader::{apply_env_overrides, apply_overrides, load_from_env};
pub use file_loader::load_from_file;
pub use model::{DispatchConfig, LoggingConfig};
