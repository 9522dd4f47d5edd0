use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Hub
// =========================================================================

fn validate_with(key: &'static str, value: &str) -> crate::ConfigErrorResult<()> {
    let _temp = setup_config_dir();
    let _guard = EnvGuard::set(key, value);
    Config::load().unwrap().validate()
}

#[test]
#[serial]
fn given_zero_buffer_capacity_when_validate_then_error() {
    assert_that!(validate_with("TELEM_BUFFER", "0"), err(anything()));
}

#[test]
#[serial]
fn given_buffer_capacity_of_one_when_validate_then_ok() {
    assert_that!(validate_with("TELEM_BUFFER", "1"), ok(anything()));
}

#[test]
#[serial]
fn given_tiny_backlog_threshold_when_validate_then_error() {
    assert_that!(
        validate_with("TELEM_BACKLOG_THRESHOLD_BYTES", "100"),
        err(anything())
    );
}

#[test]
#[serial]
fn given_sub_second_rate_window_when_validate_then_error() {
    assert_that!(validate_with("TELEM_RATE_WINDOW_MS", "999"), err(anything()));
}

#[test]
#[serial]
fn given_zero_ingest_queue_when_validate_then_error() {
    assert_that!(
        validate_with("TELEM_INGEST_QUEUE_CAPACITY", "0"),
        err(anything())
    );
}
