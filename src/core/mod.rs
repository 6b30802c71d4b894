pub mod codec;
pub mod descriptor_pipeline;
pub mod engine;
pub mod repositories;
pub mod versions;
pub mod walker;

pub use crate::domain::model::{Descriptor, FileOutcome, LoadResult, RunReport, TransformResult};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
