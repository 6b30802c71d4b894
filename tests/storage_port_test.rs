use pom_updater::core::{Pipeline, Storage};
use pom_updater::{PinConfig, PomPipeline, Result, UpdateEngine};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Storage that reads from disk but records every path it touches and never writes.
#[derive(Default)]
struct RecordingStorage {
    reads: RefCell<Vec<PathBuf>>,
    writes: RefCell<Vec<(PathBuf, Vec<u8>)>>,
}

impl Storage for RecordingStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.reads.borrow_mut().push(path.to_path_buf());
        Ok(fs::read(path)?)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), data.to_vec()));
        Ok(())
    }
}

#[test]
fn test_only_descriptors_are_opened() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("a/src")).unwrap();
    fs::write(root.join("a/pom.xml"), "<project/>").unwrap();
    fs::write(root.join("a/src/Main.java"), "class Main {}").unwrap();
    fs::write(root.join("a/pom.xml.bak"), "<project/>").unwrap();
    fs::write(root.join("Pom.Xml"), "<project/>").unwrap();

    let engine = UpdateEngine::new(
        PomPipeline::new(RecordingStorage::default(), PinConfig::default()),
        "pom.xml",
    );
    let report = engine.run(root).unwrap();

    let storage = engine.pipeline().storage();
    let mut reads = storage.reads.borrow().clone();
    reads.sort();
    let mut expected = vec![root.join("Pom.Xml"), root.join("a/pom.xml")];
    expected.sort();

    assert_eq!(reads, expected);
    assert_eq!(storage.writes.borrow().len(), 2);
    assert_eq!(report.files_visited, 4);
    assert_eq!(report.descriptors_found, 2);
}

#[test]
fn test_written_content_parses_and_carries_repositories() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("pom.xml"), "<project/>").unwrap();

    let pipeline = PomPipeline::new(RecordingStorage::default(), PinConfig::default());
    let mut descriptor = pipeline.extract(&temp_dir.path().join("pom.xml")).unwrap();
    let transform = pipeline.transform(&mut descriptor).unwrap();
    pipeline.load(&descriptor).unwrap();

    assert!(transform.repositories.added);
    let writes = pipeline.storage().writes.borrow();
    let (_, data) = &writes[0];
    let content = String::from_utf8(data.clone()).unwrap();
    assert_eq!(
        content,
        "<project><repositories>\
         <repository><id>spring-snapshots</id><name>spring-snapshots</name>\
         <url>https://repo.spring.io/snapshot</url><snapshots><enabled>true</enabled></snapshots></repository>\
         <repository><id>spring-milestones</id><name>spring-milestones</name>\
         <url>https://repo.spring.io/milestone</url><snapshots><enabled>false</enabled></snapshots></repository>\
         </repositories></project>\n"
    );
}
