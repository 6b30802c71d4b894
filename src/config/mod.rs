#[cfg(feature = "cli")]
pub mod cli;
pub mod pin_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, LogFormat};
pub use pin_config::{PinConfig, RepositorySpec};
