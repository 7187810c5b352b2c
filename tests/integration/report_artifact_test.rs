use binwatch::core::monitor::chart::save_chart;
use binwatch::core::monitor::publisher::{build_update_url, write_report, ArtifactPaths};
use binwatch::core::monitor::report::{Report, ResourceStatus};

fn report() -> Report {
    Report::build(vec![
        ResourceStatus {
            resource_id: 0,
            label: "North".to_string(),
            fullness: 72.5,
        },
        ResourceStatus {
            resource_id: 1,
            label: "South".to_string(),
            fullness: 18.0,
        },
    ])
}

#[test]
fn test_report_artifact_is_replaced_each_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::new(dir.path());

    write_report(&paths.report, &report()).unwrap();
    let first = std::fs::read_to_string(&paths.report).unwrap();
    assert!(first.contains("North: 72.50%"));
    assert!(first.contains("Most occupied: North - 72.50%"));

    // A later cycle overwrites, never appends
    let later = Report::build(vec![ResourceStatus {
        resource_id: 0,
        label: "North".to_string(),
        fullness: 10.0,
    }]);
    write_report(&paths.report, &later).unwrap();
    let second = std::fs::read_to_string(&paths.report).unwrap();
    assert!(second.contains("North: 10.00%"));
    assert!(!second.contains("72.50"));
}

#[test]
fn test_chart_artifact_written_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::new(dir.path());

    save_chart(&report(), &paths.chart).unwrap();

    let (width, height) = image::image_dimensions(&paths.chart).unwrap();
    assert_eq!(width, 640);
    assert_eq!(height, 400);
}

#[test]
fn test_combined_update_carries_all_resources_in_order() {
    let url = build_update_url(
        "https://api.thingspeak.com/update",
        "KEY",
        &[72.5, 18.0, 0.0],
    );
    assert_eq!(
        url,
        "https://api.thingspeak.com/update?api_key=KEY&field1=72.50&field2=18.00&field3=0.00"
    );
}
