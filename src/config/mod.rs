//! Configuration management

mod defaults;
mod settings;

pub use defaults::{DEFAULT_FALLBACK_PATH, DEFAULT_SYSFS_CAPACITY_PATH};
pub use settings::{AppConfig, PercentageFileConfig};
