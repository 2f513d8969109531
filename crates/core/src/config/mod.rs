//! Loading and validating `config.toml`.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{CalendarSettings, LoggingConfig, PageSettings, ResolvedConfig};
