//! Logging setup for Yagura binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a crate and its binary.
///
/// Hyphens are replaced with underscores because tracing targets use the
/// module path form of the crate name. A binary named after its crate gets a
/// single directive.
pub fn default_directive(crate_name: &str, binary_name: &str, level: &str) -> String {
    let mut targets = vec![crate_name.replace('-', "_")];
    let binary_target = binary_name.replace('-', "_");
    if !targets.contains(&binary_target) {
        targets.push(binary_target);
    }
    targets.push("tower_http".to_string());

    targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The level can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - Name of the library crate emitting most events (e.g., "yagura-server")
/// * `binary_name` - The name of the binary (e.g., "yagura-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use yagura_shared::logger::setup_logger;
///
/// setup_logger("yagura-server", "yagura-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_directive(crate_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
