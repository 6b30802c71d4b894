use crate::domain::model::{Descriptor, LoadResult, TransformResult};
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// Processing of a single descriptor file.
pub trait Pipeline {
    fn extract(&self, path: &Path) -> Result<Descriptor>;
    fn transform(&self, descriptor: &mut Descriptor) -> Result<TransformResult>;
    fn load(&self, descriptor: &Descriptor) -> Result<LoadResult>;
}
