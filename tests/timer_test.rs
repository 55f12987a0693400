//! Practice timer driven by the tokio clock

mod common;

use std::time::Duration;

use common::{init_tracing, sample_collection_json};
use ril_catalog::{Catalog, Config, Stopwatch, TimerDriver, TimerState};
use tempfile::tempdir;

#[tokio::test(start_paused = true)]
async fn test_driver_advances_one_second_per_tick() {
    init_tracing();
    let mut timer = TimerDriver::new(Duration::from_secs(1)).unwrap();
    timer.start();

    tokio::time::sleep(Duration::from_millis(42_500)).await;
    assert_eq!(timer.state(), TimerState { seconds: 42, is_active: true });

    timer.pause();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(timer.state(), TimerState { seconds: 42, is_active: false });

    timer.reset();
    assert_eq!(timer.state(), TimerState { seconds: 0, is_active: false });
}

#[tokio::test(start_paused = true)]
async fn test_pause_on_tick_boundary_does_not_leak() {
    let mut timer = TimerDriver::new(Duration::from_secs(1)).unwrap();
    timer.start();

    // Wake exactly when the third tick is due, then pause before yielding
    tokio::time::sleep(Duration::from_secs(3)).await;
    timer.pause();
    let frozen = timer.seconds();
    assert!(frozen == 2 || frozen == 3);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(timer.seconds(), frozen);
}

#[tokio::test(start_paused = true)]
async fn test_catalog_from_config_records_driver_time() {
    init_tracing();
    let dir = tempdir().unwrap();
    let collection_path = dir.path().join("challenges.json");
    std::fs::write(&collection_path, sample_collection_json()).unwrap();

    let mut config = Config::default();
    config.collection_path = Some(collection_path);
    config.storage.dir = Some(dir.path().join("storage"));
    config.timer.tick_interval_ms = 1000;

    let mut catalog = Catalog::from_config(&config).unwrap();
    assert_eq!(catalog.collection().len(), 4);

    catalog.select(4).unwrap();
    tokio::time::sleep(Duration::from_millis(95_500)).await;
    assert_eq!(catalog.formatted_time(), "1:35");

    assert_eq!(catalog.complete_selected(), Some(4));
    drop(catalog);

    let reopened = Catalog::from_config(&config).unwrap();
    assert_eq!(reopened.progress_store().completion_time(4), Some(95));
    assert_eq!(reopened.progress(), 25);
}

#[tokio::test]
async fn test_from_config_requires_collection() {
    let err = match Catalog::from_config(&Config::default()) {
        Ok(_) => panic!("expected missing collection error"),
        Err(e) => e,
    };
    assert!(err.to_string().contains("collection_path"));
}
