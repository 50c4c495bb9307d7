use marche_logger::{Logger, LoggerError};

#[test]
fn second_init_reports_subscriber_error() {
    let _logger = Logger::builder().name("marche-init-once").init().expect("first init succeeds");

    let err = Logger::builder().name("marche-init-twice").init().expect_err("second init fails");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
