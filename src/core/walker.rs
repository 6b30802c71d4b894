//! Recursive enumeration of regular files under a root directory.

use crate::utils::error::{Result, UpdaterError};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yields every regular file below the root. Symlinks are not followed.
    pub fn files(&self) -> RegularFiles {
        RegularFiles {
            root: self.root.clone(),
            inner: WalkDir::new(&self.root).follow_links(false).into_iter(),
            skipped: 0,
            done: false,
        }
    }
}

/// Single-pass iterator over regular files.
///
/// Entries that cannot be visited below the root are logged, counted and skipped.
/// A root that cannot be opened yields one `WalkError` and ends the iteration.
pub struct RegularFiles {
    root: PathBuf,
    inner: walkdir::IntoIter,
    skipped: usize,
    done: bool,
}

impl RegularFiles {
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for RegularFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        return Some(Ok(entry.into_path()));
                    }
                }
                Err(e) if e.depth() == 0 => {
                    self.done = true;
                    return Some(Err(UpdaterError::WalkError {
                        path: self.root.clone(),
                        message: e.to_string(),
                    }));
                }
                Err(e) => {
                    let skipped = UpdaterError::WalkVisit {
                        path: e.path().map(Path::to_path_buf).unwrap_or_default(),
                        message: e.to_string(),
                    };
                    warn!("⚠️ {}", skipped);
                    self.skipped += 1;
                }
            }
        }
    }
}

/// Whether `path` names the target descriptor file, ignoring ASCII case.
pub fn is_descriptor(path: &Path, target_file: &str) -> bool {
    let matched = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(target_file));
    if !matched {
        trace!("Ignoring {}", path.display());
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_yields_only_files_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("pom.xml"), "<project/>").unwrap();
        fs::write(nested.join("POM.XML"), "<project/>").unwrap();
        fs::write(nested.join("README.md"), "readme").unwrap();

        let mut files: Vec<PathBuf> = TreeWalker::new(temp_dir.path())
            .files()
            .collect::<Result<_>>()
            .unwrap();
        files.sort();

        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_missing_root_is_walk_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let mut files = TreeWalker::new(&missing).files();
        assert!(matches!(
            files.next(),
            Some(Err(UpdaterError::WalkError { .. }))
        ));
        assert!(files.next().is_none());
    }

    /// 走訪途中消失的子目錄會被略過並計數，不中斷走訪
    #[test]
    fn test_vanished_subdirectory_is_skipped_and_counted() {
        let temp_dir = TempDir::new().unwrap();
        let projects = ["alpha", "beta", "gamma"];
        for name in projects {
            let dir = temp_dir.path().join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("pom.xml"), "<project/>").unwrap();
        }

        let mut files = TreeWalker::new(temp_dir.path()).files();
        let first = files.next().unwrap().unwrap();
        let kept = first.parent().unwrap().to_path_buf();
        // the root listing is already read, so the removed siblings are still visited
        for name in projects {
            let dir = temp_dir.path().join(name);
            if dir != kept {
                fs::remove_dir_all(dir).unwrap();
            }
        }

        let rest: Vec<PathBuf> = files.by_ref().collect::<Result<_>>().unwrap();

        assert!(rest.is_empty());
        assert_eq!(files.skipped(), 2);
        assert!(first.starts_with(&kept));
    }

    #[test]
    fn test_is_descriptor_ignores_case() {
        assert!(is_descriptor(Path::new("/x/pom.xml"), "pom.xml"));
        assert!(is_descriptor(Path::new("/x/Pom.XML"), "pom.xml"));
        assert!(!is_descriptor(Path::new("/x/pom.xml.bak"), "pom.xml"));
        assert!(!is_descriptor(Path::new("/x/build.gradle"), "pom.xml"));
    }
}
