//! Configuration loading and CLI definitions.
//!
//! Configuration is layered: built-in defaults, then an optional config
//! file (json/jsonc/yaml/toml), then command-line overrides and the
//! `TARGET_DIR` environment variable.

mod cli;
mod defaults;
mod loader;
mod types;
mod validate;

pub use cli::{CliOverrides, apply_overrides};
pub use loader::{ConfigError, load_config, load_or_default};
pub use types::*;
pub use validate::validate_config;
