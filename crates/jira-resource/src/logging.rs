//! Log setup
//!
//! Concourse reads the response from stdout, so logs go to stderr.

use tracing_subscriber::EnvFilter;

/// Overrides the log filter, e.g. `JIRA_RESOURCE_LOG=jira_resource=trace`
pub const LOG_ENV: &str = "JIRA_RESOURCE_LOG";

pub fn filter_directive(env_override: Option<String>, debug: bool) -> String {
    match env_override {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ if debug => "debug".to_string(),
        _ => "info".to_string(),
    }
}

pub fn init(debug: bool) {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), debug);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(directive))
        .with_ansi(false)
        .with_target(false)
        .init();
}
