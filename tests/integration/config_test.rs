use binwatch::Config;

#[test]
fn test_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binwatch.json");

    let config = Config::sample();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.interval_secs, config.interval_secs);
    assert_eq!(loaded.alert_frequency, config.alert_frequency);
    assert_eq!(loaded.resources.len(), config.resources.len());
    assert_eq!(loaded.resources[0].label, config.resources[0].label);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binwatch.json");

    std::fs::write(
        &path,
        r#"{
            "interval_secs": 0,
            "resources": [{"label": "A", "depth": 100.0,
                "source_url": "http://localhost/a.json", "model_path": "a.json"}]
        }"#,
    )
    .unwrap();
    assert!(Config::load(&path).is_err());

    std::fs::write(&path, r#"{"resources": []}"#).unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn test_registry_ids_follow_declaration_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binwatch.json");

    std::fs::write(
        &path,
        r#"{
            "resources": [
                {"label": "North", "depth": 80.0,
                 "source_url": "http://localhost/n.json", "model_path": "n.json"},
                {"label": "South", "depth": 120.0,
                 "source_url": "http://localhost/s.json", "field": "field2",
                 "model_path": "s.json"}
            ]
        }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let registry = config.build_registry().unwrap();
    assert_eq!(registry.len(), 2);

    let north = registry.get(0).unwrap();
    assert_eq!(north.label, "North");
    assert_eq!(north.field, "field1");

    let south = registry.get(1).unwrap();
    assert_eq!(south.id, 1);
    assert_eq!(south.field, "field2");
    assert!((south.range_limit() - 126.0).abs() < 1e-9);
}
