//! Shared proptest configuration for domain property tests.

use proptest::test_runner::Config;

/// Case count defaults to 256; override with `PROPTEST_CASES` in CI.
pub fn proptest_config() -> Config {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(256);
    Config {
        cases,
        ..Config::default()
    }
}
