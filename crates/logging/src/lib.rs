#![warn(missing_docs)]

//! Shared logging helpers and CLI argument definitions for the padboard
//! workspace.
//!
//! Library crates only emit `tracing` events; binaries flatten [`LogArgs`]
//! into their CLI and call [`init`] once at startup.

use std::{env, io};

use clap::Args;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "padboard_grid=trace,config=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Filter spec selected by these flags and the environment.
    pub fn spec(&self) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
        )
    }
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        "padboard_grid",
        "padboard_ids",
        "padboard_tester",
        "config",
        "logging",
    ]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    let rust_log = env::var("RUST_LOG").ok();
    spec_with_env(trace, debug, log_level, log_filter, rust_log.as_deref())
}

/// [`compute_spec`] with the `RUST_LOG` value passed in.
fn spec_with_env(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => level_spec_for("info"),
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install a compact stderr subscriber for `args`. A subscriber that is
/// already installed is left in place.
pub fn init(args: &LogArgs) {
    let spec = args.spec();
    let installed = tracing_subscriber::registry()
        .with(env_filter_from_spec(&spec))
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .is_ok();
    if installed {
        debug!(%spec, "logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_every_crate() {
        let spec = level_spec_for("DEBUG");
        for c in our_crates() {
            assert!(spec.contains(&format!("{c}=debug")), "{c} missing from {spec}");
        }
    }

    #[test]
    fn explicit_filter_wins() {
        let s = spec_with_env(true, false, Some("warn"), Some("x=trace"), Some("y=info"));
        assert_eq!(s, "x=trace");
    }

    #[test]
    fn flags_beat_environment() {
        assert_eq!(
            spec_with_env(false, true, None, None, Some("y=info")),
            level_spec_for("debug")
        );
        assert_eq!(
            spec_with_env(false, false, Some("warn"), None, Some("y=info")),
            level_spec_for("warn")
        );
    }

    #[test]
    fn environment_then_default() {
        assert_eq!(spec_with_env(false, false, None, None, Some("y=info")), "y=info");
        assert_eq!(spec_with_env(false, false, None, None, Some("  ")), level_spec_for("info"));
        assert_eq!(spec_with_env(false, false, None, None, None), level_spec_for("info"));
    }
}
