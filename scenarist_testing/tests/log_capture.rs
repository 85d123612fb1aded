//! Tests for the drain-and-search log capture.

use rstest::rstest;
use scenarist_testing::{LogCapture, log_capture};

#[rstest]
fn captured_records_are_searchable(mut log_capture: LogCapture) {
    log_capture.clear();
    log::info!("pipeline warmed up");
    assert!(log_capture.contains("pipeline warmed up"));
}

#[rstest]
fn records_drain_as_they_are_searched(mut log_capture: LogCapture) {
    log_capture.clear();
    log::info!("first pass only");
    assert!(log_capture.contains("first pass only"));
    assert!(
        !log_capture.contains("first pass only"),
        "a searched record is consumed"
    );
}

#[rstest]
fn clear_discards_leftover_records(mut log_capture: LogCapture) {
    log::info!("stale record");
    log_capture.clear();
    assert!(!log_capture.contains("stale record"));
}
