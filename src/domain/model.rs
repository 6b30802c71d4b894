use crate::domain::tree::Document;
use crate::utils::error::UpdaterError;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// One descriptor loaded from disk, alive for the duration of its processing.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub path: PathBuf,
    pub original: Vec<u8>,
    pub document: Document,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryCheck {
    /// Repositories whose id matched a required id before any insertion.
    pub recognized: usize,
    pub added: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PinSummary {
    pub parent_versions: usize,
    pub managed_versions: usize,
    /// Pinned elements whose text was different before.
    pub changed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformResult {
    pub repositories: RepositoryCheck,
    pub versions: PinSummary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadResult {
    pub content_changed: bool,
    pub written: bool,
    pub bytes: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Processed {
        path: PathBuf,
        transform: TransformResult,
        load: LoadResult,
    },
    Failed {
        path: PathBuf,
        #[serde(serialize_with = "serialize_error")]
        error: UpdaterError,
    },
}

fn serialize_error<S: Serializer>(error: &UpdaterError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Processed { path, .. } | FileOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Summary of one run over a directory tree.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub files_visited: usize,
    pub descriptors_found: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub skipped_entries: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Processed { load, .. } if load.content_changed => self.updated += 1,
            FileOutcome::Processed { .. } => self.unchanged += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_by_outcome() {
        let mut report = RunReport::new("/code");
        report.record(FileOutcome::Processed {
            path: PathBuf::from("/code/a/pom.xml"),
            transform: TransformResult::default(),
            load: LoadResult {
                content_changed: true,
                written: true,
                bytes: 10,
            },
        });
        report.record(FileOutcome::Processed {
            path: PathBuf::from("/code/b/pom.xml"),
            transform: TransformResult::default(),
            load: LoadResult::default(),
        });
        report.record(FileOutcome::Failed {
            path: PathBuf::from("/code/c/pom.xml"),
            error: UpdaterError::malformed("/code/c/pom.xml", "unexpected end"),
        });

        assert_eq!(report.updated, 1);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.failed, 1);
        assert!(report.has_failures());
        assert_eq!(
            report.failures().next().unwrap().path(),
            Path::new("/code/c/pom.xml")
        );
    }

    #[test]
    fn test_report_serializes_errors_as_text() {
        let mut report = RunReport::new("/code");
        report.record(FileOutcome::Failed {
            path: PathBuf::from("/code/c/pom.xml"),
            error: UpdaterError::malformed("/code/c/pom.xml", "unexpected end"),
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failed"], 1);
        assert_eq!(json["outcomes"][0]["status"], "failed");
        assert!(json["outcomes"][0]["error"]
            .as_str()
            .unwrap()
            .contains("unexpected end"));
    }
}
