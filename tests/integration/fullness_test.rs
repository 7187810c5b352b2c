use std::path::PathBuf;

use binwatch::core::monitor::analyser::{fullness, FullnessAnalyser};
use binwatch::core::monitor::collector::{check_range, parse_distance, Reading};
use binwatch::core::registry::{Resource, ResourceRegistry};

fn resource(id: usize, label: &str, depth: f64) -> Resource {
    Resource {
        id,
        label: label.to_string(),
        depth,
        source_url: String::new(),
        field: "field1".to_string(),
        model_path: PathBuf::new(),
    }
}

fn reading(id: usize, distance: f64) -> Reading {
    Reading {
        resource_id: id,
        distance,
        timestamp: 0,
    }
}

#[test]
fn test_scenario_moderate_fullness() {
    // depth=100, distance=30: 70% - moderate band, below the default
    // alert threshold of 80
    assert!((fullness(100.0, 30.0) - 70.0).abs() < 1e-9);
}

#[test]
fn test_scenario_boundary_reading_accepted_and_clamped() {
    // depth=50, distance=52: 52 <= 52.5 so the reading is accepted, and
    // the raw -4% clamps to 0
    let r = resource(0, "A", 50.0);
    assert!(check_range(&r, 52.0).is_ok());
    assert_eq!(fullness(50.0, 52.0), 0.0);
}

#[test]
fn test_scenario_out_of_range_reading_keeps_prior_sample() {
    let r = resource(0, "A", 50.0);
    let registry = ResourceRegistry::new(vec![r.clone()]).unwrap();
    let mut analyser = FullnessAnalyser::new(registry.len());

    // A valid reading establishes the sample
    analyser.record(r.depth, &reading(0, 25.0));
    let before = analyser.samples()[0];
    assert!((before - 50.0).abs() < 1e-9);

    // distance=53 > 52.5 fails validation; the sample is not touched
    assert!(check_range(&r, 53.0).is_err());
    let after = analyser.samples()[0];
    assert_eq!(before, after);
}

#[test]
fn test_mixed_fault_cycle_keeps_stale_value_per_resource() {
    let a = resource(0, "A", 100.0);
    let b = resource(1, "B", 100.0);
    let registry = ResourceRegistry::new(vec![a.clone(), b.clone()]).unwrap();
    let mut analyser = FullnessAnalyser::new(registry.len());

    // Cycle 1: both resources report
    analyser.record(a.depth, &reading(0, 40.0));
    analyser.record(b.depth, &reading(1, 80.0));

    // Cycle 2: resource A faults (no record call), B reports fresh data
    analyser.record(b.depth, &reading(1, 10.0));

    let report = analyser.snapshot(&registry);
    assert!((report.statuses[0].fullness - 60.0).abs() < 1e-9, "stale value retained");
    assert!((report.statuses[1].fullness - 90.0).abs() < 1e-9, "fresh value applied");
    assert_eq!(report.most_occupied, Some(1));
    assert_eq!(report.least_occupied, Some(0));
}

#[test]
fn test_payload_parsing_accepts_thingspeak_shapes() {
    let payload = serde_json::json!({
        "created_at": "2024-08-30T12:00:00Z",
        "entry_id": 1042,
        "field1": "37.25"
    });
    assert_eq!(parse_distance(&payload, "field1"), Some(37.25));
    assert_eq!(parse_distance(&payload, "field2"), None);
}
