#![warn(missing_docs)]

//! Shared logging helpers and CLI argument definitions for select-audio-output.
//!
//! Log output is scoped to our own crates so that verbose levels do not pull
//! in noise from dependencies. Filter precedence, highest first:
//! - `--log-filter`
//! - `--trace` / `--debug` / `--log-level` (crate-scoped)
//! - `RUST_LOG`
//! - the caller's default level (crate-scoped)

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

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
    /// e.g. "audio_backend=trace,audio_engine=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Compute the filter spec for these arguments; see [`compute_spec`].
    pub fn spec(&self, default_level: &str) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
            default_level,
        )
    }
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        "select_audio_output",
        "audio_engine",
        "audio_backend",
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

/// Compute the final filter spec string.
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
    default_level: &str,
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
    match env::var("RUST_LOG") {
        Ok(spec) if !spec.trim().is_empty() => spec,
        _ => level_spec_for(default_level),
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_all_crates() {
        let spec = level_spec_for("DEBUG");
        for krate in our_crates() {
            assert!(spec.contains(&format!("{krate}=debug")));
        }
    }

    #[test]
    fn explicit_filter_wins() {
        let spec = compute_spec(true, false, Some("info"), Some("audio_engine=trace"), "warn");
        assert_eq!(spec, "audio_engine=trace");
    }

    #[test]
    fn flags_beat_level() {
        assert_eq!(
            compute_spec(false, true, None, None, "warn"),
            level_spec_for("debug")
        );
        assert_eq!(
            compute_spec(false, false, Some("error"), None, "warn"),
            level_spec_for("error")
        );
    }

    #[test]
    fn args_delegate_to_compute_spec() {
        let args = LogArgs {
            trace: true,
            ..LogArgs::default()
        };
        assert_eq!(args.spec("warn"), level_spec_for("trace"));
    }
}
