// tests/logging.rs

use devloop::cli::LogLevel;
use devloop::logging::filter_directives;

#[test]
fn cli_level_overrides_environment() {
    assert_eq!(filter_directives(Some(LogLevel::Debug), Some("trace")), "debug");
    assert_eq!(filter_directives(Some(LogLevel::Warn), None), "warn");
}

#[test]
fn environment_directives_pass_through() {
    assert_eq!(
        filter_directives(None, Some(" devloop::engine=trace,info ")),
        "devloop::engine=trace,info"
    );
}

#[test]
fn defaults_to_info() {
    assert_eq!(filter_directives(None, None), "info");
    assert_eq!(filter_directives(None, Some("  ")), "info");
}
