//! # Structured Logging Module
//!
//! Console logging for batch runs. `RUST_LOG` takes precedence; otherwise the
//! verbosity count picks the level. `WORKITEM_BATCH_LOG_FORMAT=json` switches
//! to JSON lines for machine consumption.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::state_machine::TaskState;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize logging once per process
pub fn init_logging(verbosity: u8) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

        let console = if json_requested() {
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed()
        };

        // Use try_init to avoid panic if a global subscriber already exists
        if tracing_subscriber::registry().with(console).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }
    });
}

fn json_requested() -> bool {
    std::env::var("WORKITEM_BATCH_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Map a `-v` count to a level directive
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log structured data for a single task outcome
pub fn log_task_operation(
    operation: &str,
    title: &str,
    state: TaskState,
    work_item_id: Option<i64>,
    details: Option<&str>,
) {
    if state.is_failure() {
        tracing::error!(
            operation = %operation,
            title = %title,
            state = %state,
            work_item_id = work_item_id,
            details = details,
            "TASK_OPERATION"
        );
    } else {
        tracing::info!(
            operation = %operation,
            title = %title,
            state = %state,
            work_item_id = work_item_id,
            details = details,
            "TASK_OPERATION"
        );
    }
}
