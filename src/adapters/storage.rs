use crate::domain::ports::Storage;
use crate::utils::error::{Result, UpdaterError};
use std::fs;
use std::path::Path;

/// Blocking filesystem storage. Each call opens, uses and closes its own handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| UpdaterError::file_io(path, e))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        fs::write(path, data).map_err(|e| UpdaterError::file_io(path, e))
    }
}
