use binwatch::core::model::{RateModel, TableRateModel, WeekClock};
use binwatch::core::monitor::predictor::{format_minutes, predict_depletion, predict_rate};

#[test]
fn test_model_roundtrip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let mut rates = vec![vec![0.0; 24]; 7];
    rates[3][9] = -0.75; // Wednesday 09:00
    let data = serde_json::json!({ "rates": rates });
    std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

    let model = TableRateModel::load(&path).unwrap();
    assert_eq!(model.rate(9 * 60 + 30, 3), -0.75);
    assert_eq!(model.rate(9 * 60 + 30, 4), 0.0);
}

#[test]
fn test_malformed_store_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    std::fs::write(&path, r#"{"rates": [[1.0, 2.0]]}"#).unwrap();
    assert!(TableRateModel::load(&path).is_err());

    std::fs::write(&path, "not json").unwrap();
    assert!(TableRateModel::load(&path).is_err());

    assert!(TableRateModel::load(&dir.path().join("missing.json")).is_err());
}

#[test]
fn test_depletion_simulation_is_deterministic() {
    let mut rates = vec![vec![-0.01; 24]; 7];
    rates[2][14] = -1.5;
    let model = TableRateModel::new(rates).unwrap();
    let start = WeekClock::new(13 * 60, 2);

    let runs: Vec<Option<u64>> = (0..3)
        .map(|_| predict_depletion(42.0, &model, start, 30))
        .collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
    assert!(runs[0].is_some());
}

#[test]
fn test_restock_only_model_reports_no_depletion() {
    let model = TableRateModel::constant(0.3);
    let start = WeekClock::new(0, 0);
    assert_eq!(predict_depletion(80.0, &model, start, 14), None);
}

#[test]
fn test_predict_rate_uses_weekly_position() {
    let mut rates = vec![vec![0.0; 24]; 7];
    rates[0][0] = -0.1;
    rates[6][23] = -0.9;
    let model = TableRateModel::new(rates).unwrap();

    assert_eq!(predict_rate(&model, WeekClock::new(0, 0)), -0.1);
    assert_eq!(predict_rate(&model, WeekClock::new(23 * 60 + 59, 6)), -0.9);
    assert_eq!(predict_rate(&model, WeekClock::new(12 * 60, 3)), 0.0);
}

#[test]
fn test_week_long_simulation_crosses_weekday_boundaries() {
    // Consumption only on Saturday; start on Sunday. The whole week must
    // elapse before any depletion happens.
    let mut rates = vec![vec![0.0; 24]; 7];
    rates[6] = vec![-1.0; 24];
    let model = TableRateModel::new(rates).unwrap();
    let start = WeekClock::new(0, 0);

    let minutes = predict_depletion(10.0, &model, start, 30).unwrap();
    // Six idle days, then 10 consuming minutes
    assert_eq!(minutes, 6 * 1440 + 10);
    assert_eq!(format_minutes(minutes), "6 days, 0 hours, 10 minutes");
}
