use crate::config::pin_config::PinConfig;
use crate::core::codec::{parse_descriptor, render_descriptor};
use crate::core::repositories::RepositoryEnforcer;
use crate::core::versions::VersionPinner;
use crate::core::{Descriptor, LoadResult, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;
use std::path::Path;

/// Parse, normalize and write back one `pom.xml`.
pub struct PomPipeline<S: Storage> {
    storage: S,
    pins: PinConfig,
    dry_run: bool,
}

impl<S: Storage> PomPipeline<S> {
    pub fn new(storage: S, pins: PinConfig) -> Self {
        Self {
            storage,
            pins,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn pins(&self) -> &PinConfig {
        &self.pins
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Storage> Pipeline for PomPipeline<S> {
    fn extract(&self, path: &Path) -> Result<Descriptor> {
        let original = self.storage.read_file(path)?;
        let document = parse_descriptor(path, &original)?;
        Ok(Descriptor {
            path: path.to_path_buf(),
            original,
            document,
        })
    }

    fn transform(&self, descriptor: &mut Descriptor) -> Result<TransformResult> {
        let repositories = RepositoryEnforcer::new(&self.pins).enforce(&mut descriptor.document);
        if repositories.added {
            tracing::info!(
                "{} needs the required repositories ({} recognized)",
                descriptor.path.display(),
                repositories.recognized
            );
        }

        let versions = VersionPinner::new(&self.pins).pin(&mut descriptor.document);
        tracing::debug!(
            "Pinned {} parent and {} managed versions in {}",
            versions.parent_versions,
            versions.managed_versions,
            descriptor.path.display()
        );

        Ok(TransformResult {
            repositories,
            versions,
        })
    }

    fn load(&self, descriptor: &Descriptor) -> Result<LoadResult> {
        let rendered = render_descriptor(&descriptor.document);
        tracing::debug!("{}", rendered);

        let content_changed = rendered.as_bytes() != descriptor.original.as_slice();
        if self.dry_run {
            if content_changed {
                tracing::info!("🔍 Would update {}", descriptor.path.display());
            }
            return Ok(LoadResult {
                content_changed,
                written: false,
                bytes: rendered.len(),
            });
        }

        self.storage
            .write_file(&descriptor.path, rendered.as_bytes())?;

        Ok(LoadResult {
            content_changed,
            written: true,
            bytes: rendered.len(),
        })
    }
}
