use crate::config::pin_config::PinConfig;
use crate::domain::model::PinSummary;
use crate::domain::tree::{Document, Element};

/// Rewrites the parent version and the managed version of the secondary platform BOM.
pub struct VersionPinner<'a> {
    pins: &'a PinConfig,
}

impl<'a> VersionPinner<'a> {
    pub fn new(pins: &'a PinConfig) -> Self {
        Self { pins }
    }

    pub fn pin(&self, document: &mut Document) -> PinSummary {
        let mut summary = PinSummary::default();
        self.pin_parent(document, &mut summary);
        self.pin_managed_dependencies(document, &mut summary);
        summary
    }

    /// Every direct `version` child of the first `parent` element.
    fn pin_parent(&self, document: &mut Document, summary: &mut PinSummary) {
        let Some(parent) = document.root_mut().first_descendant_mut("parent") else {
            return;
        };

        for version in parent.children_named_mut("version") {
            summary.parent_versions += 1;
            if replace_text(version, &self.pins.platform_version) {
                summary.changed += 1;
            }
        }
    }

    /// `dependencyManagement/*/*` entries whose artifactId is the secondary artifact.
    /// An entry without a `version` child is left as is.
    fn pin_managed_dependencies(&self, document: &mut Document, summary: &mut PinSummary) {
        let artifact = self.pins.secondary_artifact.as_str();
        let version = self.pins.secondary_version.as_str();

        document
            .root_mut()
            .for_each_descendant_mut("dependencyManagement", &mut |management| {
                for section in management.child_elements_mut() {
                    for candidate in section.child_elements_mut() {
                        if !has_artifact_id(candidate, artifact) {
                            continue;
                        }
                        if let Some(current) = candidate.first_child_mut("version") {
                            summary.managed_versions += 1;
                            if replace_text(current, version) {
                                summary.changed += 1;
                            }
                        }
                    }
                }
            });
    }
}

fn has_artifact_id(candidate: &Element, artifact: &str) -> bool {
    candidate
        .children_named("artifactId")
        .any(|id| id.text().eq_ignore_ascii_case(artifact))
}

fn replace_text(element: &mut Element, value: &str) -> bool {
    let changed = element.text() != value;
    element.set_text(value);
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::parse_descriptor;
    use std::path::Path;

    fn parse(xml: &str) -> Document {
        parse_descriptor(Path::new("pom.xml"), xml.as_bytes()).unwrap()
    }

    const MANAGED: &str = r#"<project>
  <parent>
    <groupId>org.springframework.boot</groupId>
    <artifactId>spring-boot-starter-parent</artifactId>
    <version>1.0.0.RELEASE</version>
  </parent>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.springframework.cloud</groupId>
        <artifactId>spring-cloud-dependencies</artifactId>
        <version>X</version>
        <type>pom</type>
        <scope>import</scope>
      </dependency>
      <dependency>
        <groupId>com.example</groupId>
        <artifactId>other-bom</artifactId>
        <version>X</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
</project>"#;

    fn managed_version(doc: &Document, artifact: &str) -> String {
        doc.elements_by_name("dependency")
            .into_iter()
            .find(|d| d.first_child("artifactId").unwrap().text() == artifact)
            .and_then(|d| d.first_child("version"))
            .map(Element::text)
            .unwrap()
    }

    #[test]
    fn test_pins_parent_and_matching_managed_entry() {
        let pins = PinConfig::default();
        let mut doc = parse(MANAGED);

        let summary = VersionPinner::new(&pins).pin(&mut doc);

        let parent = doc.root().first_child("parent").unwrap();
        assert_eq!(parent.first_child("version").unwrap().text(), "2.0.6.RELEASE");
        assert_eq!(managed_version(&doc, "spring-cloud-dependencies"), "Finchley.SR2");
        assert_eq!(managed_version(&doc, "other-bom"), "X");
        assert_eq!(
            summary,
            PinSummary {
                parent_versions: 1,
                managed_versions: 1,
                changed: 2,
            }
        );
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let pins = PinConfig::default();
        let mut doc = parse(MANAGED);
        VersionPinner::new(&pins).pin(&mut doc);
        let after_first = doc.clone();

        let summary = VersionPinner::new(&pins).pin(&mut doc);

        assert_eq!(summary.changed, 0);
        assert_eq!(doc, after_first);
    }

    #[test]
    fn test_without_parent_is_noop() {
        let pins = PinConfig::default();
        let mut doc = parse("<project><version>1.0</version></project>");
        let before = doc.clone();

        let summary = VersionPinner::new(&pins).pin(&mut doc);

        assert_eq!(summary, PinSummary::default());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_only_first_parent_is_pinned() {
        let pins = PinConfig::default();
        let mut doc = parse(
            "<project><parent><VERSION>1</VERSION><version>2</version></parent>\
             <profiles><parent><version>3</version></parent></profiles></project>",
        );

        VersionPinner::new(&pins).pin(&mut doc);

        let parents = doc.elements_by_name("parent");
        let first: Vec<String> = parents[0].child_elements().map(Element::text).collect();
        assert_eq!(first, vec!["2.0.6.RELEASE", "2.0.6.RELEASE"]);
        assert_eq!(parents[1].first_child("version").unwrap().text(), "3");
    }

    #[test]
    fn test_matching_entry_without_version_is_not_given_one() {
        let pins = PinConfig::default();
        let mut doc = parse(
            "<project><dependencyManagement><dependencies><dependency>\
             <artifactId>Spring-Cloud-Dependencies</artifactId>\
             </dependency></dependencies></dependencyManagement></project>",
        );

        let summary = VersionPinner::new(&pins).pin(&mut doc);

        assert_eq!(summary.managed_versions, 0);
        let dependency = doc.elements_by_name("dependency")[0];
        assert!(dependency.first_child("version").is_none());
    }

    #[test]
    fn test_padded_artifact_id_is_not_matched() {
        let pins = PinConfig::default();
        let mut doc = parse(
            "<project><dependencyManagement><dependencies><dependency>\
             <artifactId> spring-cloud-dependencies </artifactId><version>X</version>\
             </dependency></dependencies></dependencyManagement></project>",
        );

        let summary = VersionPinner::new(&pins).pin(&mut doc);

        assert_eq!(summary.managed_versions, 0);
        let dependency = doc.elements_by_name("dependency")[0];
        assert_eq!(dependency.first_child("version").unwrap().text(), "X");
    }

    #[test]
    fn test_entries_outside_two_levels_are_ignored() {
        let pins = PinConfig::default();
        let mut doc = parse(
            "<project><dependencies><dependency>\
             <artifactId>spring-cloud-dependencies</artifactId><version>X</version>\
             </dependency></dependencies></project>",
        );

        VersionPinner::new(&pins).pin(&mut doc);

        assert_eq!(managed_version(&doc, "spring-cloud-dependencies"), "X");
    }
}
