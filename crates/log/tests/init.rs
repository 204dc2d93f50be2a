//! Global logger installation. Runs in its own test binary because the
//! global subscriber can only be set once per process.

use assay_log::{Config, Format, LogError, init_with};

#[test]
fn installs_once() {
    let info = init_with(Config {
        level: "warning".to_owned(),
        ..Config::test()
    })
    .unwrap();
    assert_eq!(info.filter(), "warn");
    assert_eq!(info.format(), Format::Compact);

    tracing::warn!(target: "assay_log::tests", "logger installed");

    let second = init_with(Config::test());
    assert!(matches!(second, Err(LogError::Init(_))));
}
