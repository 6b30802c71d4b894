use crate::core::walker::{is_descriptor, TreeWalker};
use crate::core::{FileOutcome, Pipeline, RunReport};
use crate::utils::error::Result;
use std::path::Path;

pub struct UpdateEngine<P: Pipeline> {
    pipeline: P,
    target_file: String,
    fail_fast: bool,
}

impl<P: Pipeline> UpdateEngine<P> {
    pub fn new(pipeline: P, target_file: impl Into<String>) -> Self {
        Self {
            pipeline,
            target_file: target_file.into(),
            fail_fast: false,
        }
    }

    /// Abort the run on the first descriptor error instead of recording it.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Walks `root` and processes every descriptor found, one after the other.
    ///
    /// Only a root that cannot be walked (or, with fail-fast, a descriptor error)
    /// makes this return `Err`; everything else ends up in the report.
    pub fn run(&self, root: &Path) -> Result<RunReport> {
        tracing::info!("Starting pom update under {}", root.display());

        let mut report = RunReport::new(root);
        let mut files = TreeWalker::new(root).files();

        for entry in files.by_ref() {
            let path = entry?;
            report.files_visited += 1;

            if !is_descriptor(&path, &self.target_file) {
                continue;
            }
            report.descriptors_found += 1;

            match self.process_file(&path) {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
                    if self.fail_fast {
                        return Err(e);
                    }
                    report.record(FileOutcome::Failed { path, error: e });
                }
            }
        }
        report.skipped_entries = files.skipped();

        tracing::info!(
            "Visited {} files: {} descriptors, {} updated, {} unchanged, {} failed, {} skipped",
            report.files_visited,
            report.descriptors_found,
            report.updated,
            report.unchanged,
            report.failed,
            report.skipped_entries
        );
        Ok(report)
    }

    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        tracing::debug!("Processing {}", path.display());

        let mut descriptor = self.pipeline.extract(path)?;
        let transform = self.pipeline.transform(&mut descriptor)?;
        let load = self.pipeline.load(&descriptor)?;

        Ok(FileOutcome::Processed {
            path: descriptor.path,
            transform,
            load,
        })
    }
}
