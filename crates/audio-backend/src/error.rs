//! Error handling for the audio backend.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io,
    result::Result as StdResult,
};

use thiserror::Error;

/// Convenient result type for backend operations.
pub type Result<T> = StdResult<T, Error>;

/// A best-effort backend capability, used to label `Unsupported` outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Reading the output volume.
    ReadVolume,
    /// Changing the output volume.
    WriteVolume,
    /// Reading the output mute flag.
    ReadMute,
    /// Changing the output mute flag.
    WriteMute,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            Self::ReadVolume => "reading the output volume",
            Self::WriteVolume => "setting the output volume",
            Self::ReadMute => "reading the mute state",
            Self::WriteMute => "setting the mute state",
        };
        f.write_str(s)
    }
}

/// Errors surfaced by an audio backend.
#[derive(Debug, Error)]
pub enum Error {
    /// The audio control tool could not be started at all.
    #[error("{tool} could not be started ({source}). {hint}")]
    BackendUnavailable {
        /// Program that failed to start.
        tool: String,
        /// Installation or configuration hint for the user.
        hint: &'static str,
        /// The underlying spawn error.
        source: io::Error,
    },

    /// The tool ran but reported failure.
    #[error("{program} failed ({}): {stderr}", describe_code(.code))]
    CommandFailed {
        /// The command being executed.
        program: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The tool ran successfully but printed something we could not interpret.
    #[error("unexpected output while {capability}: {output:?}")]
    Parse {
        /// Capability being exercised.
        capability: Capability,
        /// The raw (trimmed) output.
        output: String,
    },

    /// Every known way of exercising a capability failed.
    #[error("{0} is not supported on this system")]
    Unsupported(Capability),
}

/// Render an optional exit code for error messages.
fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_message_includes_code_and_stderr() {
        let err = Error::CommandFailed {
            program: "SwitchAudioSource".into(),
            code: Some(1),
            stderr: "Could not find an audio device named \"Foo\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "SwitchAudioSource failed (exit code 1): Could not find an audio device named \"Foo\""
        );
    }

    #[test]
    fn unsupported_names_the_capability() {
        let err = Error::Unsupported(Capability::WriteMute);
        assert_eq!(
            err.to_string(),
            "setting the mute state is not supported on this system"
        );
    }
}
