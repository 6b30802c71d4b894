use crate::config::pin_config::{PinConfig, RepositorySpec};
use crate::domain::model::RepositoryCheck;
use crate::domain::tree::{Document, Element};

/// Makes sure every descriptor declares the two required repositories.
pub struct RepositoryEnforcer<'a> {
    pins: &'a PinConfig,
}

impl<'a> RepositoryEnforcer<'a> {
    pub fn new(pins: &'a PinConfig) -> Self {
        Self { pins }
    }

    /// Number of `repository` elements, anywhere in the document, with a required id.
    ///
    /// Two entries with the same required id count twice.
    pub fn recognized_count(&self, document: &Document) -> usize {
        document
            .elements_by_name("repository")
            .into_iter()
            .filter(|repository| {
                repository
                    .children_named("id")
                    .any(|id| self.pins.is_required_repository_id(&id.text()))
            })
            .count()
    }

    /// Appends both required repositories unless exactly two are already recognized.
    /// Existing entries are never removed or merged.
    pub fn enforce(&self, document: &mut Document) -> RepositoryCheck {
        let recognized = self.recognized_count(document);
        if recognized == 2 {
            return RepositoryCheck {
                recognized,
                added: false,
            };
        }

        let root = document.root_mut();
        if root.first_descendant("repositories").is_none() {
            root.append_child(Element::new("repositories"));
        }
        if let Some(container) = root.first_descendant_mut("repositories") {
            for spec in self.pins.required_repositories() {
                container.append_child(repository_element(spec));
            }
        }

        RepositoryCheck {
            recognized,
            added: true,
        }
    }
}

fn repository_element(spec: &RepositorySpec) -> Element {
    Element::new("repository")
        .with_child(Element::with_text("id", spec.id.as_str()))
        .with_child(Element::with_text("name", spec.id.as_str()))
        .with_child(Element::with_text("url", spec.url.as_str()))
        .with_child(
            Element::new("snapshots")
                .with_child(Element::with_text("enabled", spec.snapshots_enabled.to_string())),
        )
}
