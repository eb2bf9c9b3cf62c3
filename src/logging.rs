//! Tracing setup plus one structured event helper per wizard concern
//! (navigation, duration probes, commit dispatch, errors).

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

static SUBSCRIBER_INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber once per process
///
/// `RUST_LOG` wins over the level derived from `WIZARD_ENV`.
/// `WIZARD_LOG_FORMAT=json` switches console output to JSON lines.
pub fn init_structured_logging() {
    SUBSCRIBER_INSTALLED.get_or_init(|| {
        let environment = wizard_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level(&environment)));

        let layer: Box<dyn Layer<Registry> + Send + Sync> = if json_format_requested() {
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(filter)
                .boxed()
        };

        // A global subscriber may already be installed by the host application
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(environment = %environment, "Structured logging initialized");
    });
}

fn wizard_environment() -> String {
    std::env::var("WIZARD_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| String::from("development"))
}

/// Only production is quiet by default
fn default_level(environment: &str) -> &'static str {
    if environment.eq_ignore_ascii_case("production") {
        "info"
    } else {
        "debug"
    }
}

fn json_format_requested() -> bool {
    std::env::var("WIZARD_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Log structured data for wizard operations
pub fn log_wizard_operation(
    operation: &str,
    project_id: Option<&str>,
    step: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        project_id = project_id,
        step = step,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "WIZARD_OPERATION"
    );
}

/// Log structured data for duration probe operations
pub fn log_probe_operation(
    operation: &str,
    track_id: &str,
    status: &str,
    duration_secs: Option<u32>,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        track_id = %track_id,
        status = %status,
        duration_secs = duration_secs,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "PROBE_OPERATION"
    );
}

/// Log structured data for commit dispatch
pub fn log_commit_operation(
    target: &str,
    project_id: Option<&str>,
    project_type: &str,
    status: &str,
    duration_ms: Option<u64>,
    details: Option<&str>,
) {
    tracing::info!(
        target_kind = %target,
        project_id = project_id,
        project_type = %project_type,
        status = %status,
        duration_ms = duration_ms,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "COMMIT_OPERATION"
    );
}

/// Error event tagged with the component that raised it
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
