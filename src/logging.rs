//! Logging setup and navigation traces
//!
//! Panelnav logs through the `log` facade. Hosts that have no logger of
//! their own can install `env_logger` with [`init_logging`]; `RUST_LOG`
//! still overrides the default filter.
//!
//! ```no_run
//! panelnav::logging::init_logging("info");
//! ```

use crate::navigation::BackStack;
use std::fmt::Debug;

/// Installs `env_logger` with `default_level` as the fallback filter.
///
/// Returns `false` if a logger was already installed.
pub fn init_logging(default_level: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init()
        .is_ok()
}

/// Logger for tests: debug level, captured by the test harness.
pub fn init_test_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

/// One-line rendering of the back-stack, bottom frame first:
/// `[Level <- MainMenu] [LevelDetail <- Level]`.
pub fn format_back_stack<Id: Copy + PartialEq + Debug>(stack: &BackStack<Id>) -> String {
    if stack.is_empty() {
        return "(empty)".to_string();
    }

    stack
        .frames()
        .iter()
        .map(|frame| {
            let targets: Vec<String> = frame
                .back_show_targets()
                .iter()
                .map(|id| format!("{:?}", id))
                .collect();
            format!("[{:?} <- {}]", frame.owner(), targets.join(", "))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
