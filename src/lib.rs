pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::{PinConfig, RepositorySpec};
pub use crate::core::{descriptor_pipeline::PomPipeline, engine::UpdateEngine};
pub use domain::model::{FileOutcome, RunReport};
pub use utils::error::{Result, UpdaterError};
