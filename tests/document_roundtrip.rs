/// Use-case document tests: file round-trip, empty collections, legacy
/// encodings and failure modes.

use std::fs;
use tempfile::tempdir;
use yukon_core::domain::ProjectConfig;
use yukon_core::infrastructure::ConfigDocument;
use yukon_core::YukonError;

/// Config with `method_counts.len()` use cases, the i-th holding
/// `method_counts[i]` methods.
fn config_with(method_counts: &[usize]) -> ProjectConfig {
    let mut config = ProjectConfig::new("C:\\Projects\\Editor");
    for (i, count) in method_counts.iter().enumerate() {
        let index = config.add_use_case(format!("Use case {}", i));
        let use_case = config.use_case_mut(index).unwrap();
        for m in 0..*count {
            use_case.add_method(format!("int Module{}::method{}(const std::map<K, V>&)", i, m));
        }
    }
    config
}

#[test]
fn test_round_trip_various_shapes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.xml");

    for counts in [vec![], vec![0], vec![3], vec![2, 0, 5], vec![1, 1, 1, 1]] {
        let config = config_with(&counts);
        ConfigDocument::write(&config, &path).unwrap();
        let loaded = ConfigDocument::read(&path).unwrap();
        assert_eq!(loaded, config, "round-trip failed for {:?}", counts);
    }
}

#[test]
fn test_round_trip_keeps_duplicates_and_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.xml");

    let mut config = ProjectConfig::new("/home/dev/editor/");
    for name in ["Save", "Open", "Save"] {
        let index = config.add_use_case(name);
        let use_case = config.use_case_mut(index).unwrap();
        use_case.add_method("void b()");
        use_case.add_method("void a()");
        use_case.add_method("void b()");
    }

    ConfigDocument::write(&config, &path).unwrap();
    let loaded = ConfigDocument::read(&path).unwrap();

    let names: Vec<&str> = loaded.use_cases.iter().map(|uc| uc.name.as_str()).collect();
    assert_eq!(names, vec!["Save", "Open", "Save"]);
    assert_eq!(loaded.use_cases[2].methods, vec!["void b()", "void a()", "void b()"]);
}

#[test]
fn test_empty_methods_stay_present() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.xml");

    let config = config_with(&[0]);
    ConfigDocument::write(&config, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.contains("<methods>"));

    let loaded = ConfigDocument::read(&path).unwrap();
    assert_eq!(loaded.use_cases.len(), 1);
    assert!(loaded.use_cases[0].methods.is_empty());
}

#[test]
fn test_unicode_and_markup_characters() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.xml");

    let mut config = ProjectConfig::new("/home/dévelopeur/проект");
    let index = config.add_use_case("Öffnen & <Speichern>");
    let use_case = config.use_case_mut(index).unwrap();
    use_case.add_method("template<typename T> void Ω::f(T&& x) /* \"quoted\" 'single' */");
    use_case.add_method("运行()");

    ConfigDocument::write(&config, &path).unwrap();
    assert_eq!(ConfigDocument::read(&path).unwrap(), config);
}

#[test]
fn test_reads_legacy_utf16_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.xml");

    let xml = r#"<?xml version="1.0" encoding="utf-16"?>
<yukonConfig>
  <projectDirectory>C:\Projects\Editor/</projectDirectory>
  <useCases>
    <useCase>
      <name>Create New File</name>
      <methods>
        <method>void FileIO::openFile(string)</method>
      </methods>
    </useCase>
  </useCases>
</yukonConfig>"#;
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(xml.encode_utf16().flat_map(u16::to_le_bytes));
    fs::write(&path, bytes).unwrap();

    let config = ConfigDocument::read(&path).unwrap();
    assert_eq!(config.project_directory(), "C:\\Projects\\Editor/");
    assert_eq!(config.use_cases[0].name, "Create New File");
    assert_eq!(config.use_cases[0].methods, vec!["void FileIO::openFile(string)"]);
}

#[test]
fn test_missing_project_directory_is_malformed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.xml");
    fs::write(
        &path,
        "<yukonConfig><useCases><useCase><name>A</name><methods/></useCase></useCases></yukonConfig>",
    )
    .unwrap();

    let result = ConfigDocument::read(&path);
    assert!(matches!(result, Err(YukonError::MalformedDocument(_))), "{:?}", result);
}

#[test]
fn test_missing_file_is_io_failure() {
    let dir = tempdir().unwrap();
    let result = ConfigDocument::read(&dir.path().join("absent.xml"));
    match result {
        Err(e @ YukonError::Io { .. }) => assert!(e.is_not_found()),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_unwritable_destination_is_io_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("input.xml");

    let result = ConfigDocument::write(&config_with(&[1]), &path);
    assert!(matches!(result, Err(YukonError::Io { .. })));
    assert!(!path.exists());
}

#[test]
fn test_overwrite_replaces_previous_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.xml");

    ConfigDocument::write(&config_with(&[4, 4]), &path).unwrap();
    let smaller = config_with(&[1]);
    ConfigDocument::write(&smaller, &path).unwrap();

    assert_eq!(ConfigDocument::read(&path).unwrap(), smaller);
    assert!(!dir.path().join("input.xml.tmp").exists());
}
