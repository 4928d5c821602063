//! Utilities for running external commands.
//!
//! Every process the backend launches goes through [`CommandRunner`], so the
//! parsing and fallback logic can be exercised without touching the system.

use std::{
    io,
    process::{Command, Stdio},
};

use tracing::trace;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run that printed `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and error text.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// True when the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Minimal process API used by the backend.
pub trait CommandRunner {
    /// Run `program` with `args` to completion, capturing its output.
    ///
    /// An `Err` means the process could not be started at all.
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}

/// Production runner backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        trace!(program, ?args, "run");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
