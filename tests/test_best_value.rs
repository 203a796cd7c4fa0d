mod common;

use common::{add_scored, setup};
use gpumarket::domain::values::channel::Channel;
use gpumarket::domain::values::resolution::Resolution;

#[test]
fn test_report_excludes_unpriced_and_unscored() {
    let (gm, _) = setup();
    add_scored(&gm, "Priced", 100.0);
    gm.ingest_aggregate("Priced", Channel::Used, 400.0).unwrap();
    add_scored(&gm, "No Price", 90.0);
    gm.add_product("No Score".into(), None, Some(300.0), None)
        .unwrap();
    // Floor: launch price of $40 is broken data, not a price.
    add_scored(&gm, "Too Cheap", 80.0);
    gm.add_product("Floor".into(), Some(80.0), Some(40.0), None)
        .unwrap();

    let records = gm.report().unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Priced"]);
}

#[test]
fn test_waterfall_feeds_report() {
    let (gm, _) = setup();
    gm.add_product("Card".into(), Some(100.0), Some(399.0), None)
        .unwrap();
    gm.ingest_aggregate("Card", Channel::New, 250.0).unwrap();

    let record = gm.product_report("Card").unwrap();
    assert_eq!(record.active_price, Some(250.0));
}

#[test]
fn test_fps_and_cost_per_frame() {
    let (gm, _) = setup();
    add_scored(&gm, "Card", 80.0);
    gm.ingest_aggregate("Card", Channel::Used, 240.0).unwrap();

    let record = gm.product_report("Card").unwrap();
    assert!((record.fps_1080p.unwrap() - 51.2).abs() < 1e-9);
    assert!((record.value_1080p.unwrap() - 4.6875).abs() < 1e-9);
    assert!((record.fps_1440p.unwrap() - 40.8).abs() < 1e-9);
    assert!((record.fps_4k.unwrap() - 35.36).abs() < 1e-9);
}

#[test]
fn test_single_record_renders_missing_data_as_null() {
    let (gm, _) = setup();
    gm.add_product("Bare".into(), None, None, None).unwrap();

    let record = gm.product_report("Bare").unwrap();
    assert_eq!(record.active_price, None);
    assert_eq!(record.fps_1080p, None);
    assert_eq!(record.value_4k, None);
    assert_eq!(record.tier, None);
}

#[test]
fn test_zero_performance_gives_no_value() {
    let (gm, _) = setup();
    add_scored(&gm, "Dead Card", 0.0);
    gm.ingest_aggregate("Dead Card", Channel::Used, 100.0).unwrap();

    let record = gm.product_report("Dead Card").unwrap();
    assert_eq!(record.fps_1080p, Some(0.0));
    // Cost per frame is undefined, never infinity.
    assert_eq!(record.value_1080p, None);

    // And it can never win a best-value query.
    let ranked = gm.best_value(Resolution::R1080p, 0.0, 10).unwrap();
    assert!(ranked.iter().all(|r| r.name != "Dead Card"));
}

#[test]
fn test_best_value_ranks_by_cost_per_frame() {
    let (gm, _) = setup();
    // 100% at $320: 64 fps, $5/frame. 80% at $204.80: 51.2 fps, $4/frame.
    add_scored(&gm, "Expensive", 100.0);
    gm.ingest_aggregate("Expensive", Channel::Used, 320.0).unwrap();
    add_scored(&gm, "Bargain", 80.0);
    gm.ingest_aggregate("Bargain", Channel::Used, 204.80).unwrap();

    let ranked = gm.best_value(Resolution::R1080p, 50.0, 10).unwrap();
    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Bargain", "Expensive"]);
}

#[test]
fn test_best_value_threshold_filters() {
    let (gm, _) = setup();
    add_scored(&gm, "Fast", 100.0);
    gm.ingest_aggregate("Fast", Channel::Used, 500.0).unwrap();
    add_scored(&gm, "Slow", 50.0);
    gm.ingest_aggregate("Slow", Channel::Used, 100.0).unwrap();

    // Slow is far better value but misses the 60 fps bar.
    let ranked = gm.best_value(Resolution::R1080p, 60.0, 10).unwrap();
    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Fast"]);
}

#[test]
fn test_best_value_tie_breaks_by_price_then_name() {
    let (gm, _) = setup();
    // Same $5/frame at 1080p; B is cheaper outright.
    add_scored(&gm, "A Card", 100.0);
    gm.ingest_aggregate("A Card", Channel::Used, 320.0).unwrap();
    add_scored(&gm, "B Card", 50.0);
    gm.ingest_aggregate("B Card", Channel::Used, 160.0).unwrap();
    // Identical to A in price and value: name decides.
    add_scored(&gm, "C Card", 100.0);
    gm.ingest_aggregate("C Card", Channel::Used, 320.0).unwrap();

    let ranked = gm.best_value(Resolution::R1080p, 0.0, 10).unwrap();
    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["B Card", "A Card", "C Card"]);
}

#[test]
fn test_best_value_respects_limit() {
    let (gm, _) = setup();
    for i in 0..6 {
        let name = format!("GPU {i}");
        add_scored(&gm, &name, 100.0);
        gm.ingest_aggregate(&name, Channel::Used, 300.0 + i as f64)
            .unwrap();
    }
    let ranked = gm.best_value(Resolution::R1440p, 0.0, 3).unwrap();
    assert_eq!(ranked.len(), 3);
}

#[test]
fn test_negative_min_fps_rejected() {
    let (gm, _) = setup();
    assert!(gm.best_value(Resolution::R4k, -1.0, 10).is_err());
}
