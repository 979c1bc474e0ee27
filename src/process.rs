//! Centralized command execution with consistent error handling.
//!
//! All external tools this crate invokes go through [`Cmd`], which either
//! captures output (`run`) or streams it to the terminal (`run_interactive`).
//! Failures carry the child's exit code as an [`ExitStatusError`] so callers
//! can propagate it as the process exit status.

use anyhow::{Context, Error, Result};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error as ThisError;

/// A child process exited with a non-zero status.
///
/// Lives at the root of the anyhow chain for every command failure, so
/// `err.downcast_ref::<ExitStatusError>()` recovers the code at any level.
#[derive(Debug, ThisError)]
#[error("exit code {code}")]
pub struct ExitStatusError {
    /// Exit code of the child, or -1 if terminated by signal.
    pub code: i32,
}

/// Result of a captured command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit status of the command.
    pub status: ExitStatus,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

impl CommandResult {
    /// Returns true if the command exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Get the exit code, or -1 if terminated by signal.
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }

    /// Get stdout, trimmed of whitespace.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Get stderr, trimmed of whitespace.
    pub fn stderr_trimmed(&self) -> &str {
        self.stderr.trim()
    }
}

/// Builder for configuring command execution.
pub struct Cmd {
    program: String,
    args: Vec<String>,
    /// If true, don't fail on non-zero exit.
    allow_fail: bool,
    /// If true, echo the argv line to stdout before executing.
    trace: bool,
    /// Custom error message prefix.
    error_prefix: Option<String>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            allow_fail: false,
            trace: false,
            error_prefix: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Allow non-zero exit codes without failing.
    pub fn allow_fail(mut self) -> Self {
        self.allow_fail = true;
        self
    }

    /// Echo the command line before running it, shell `set -x` style.
    pub fn trace(mut self) -> Self {
        self.trace = true;
        self
    }

    /// Set a custom error message prefix.
    pub fn error_msg(mut self, msg: impl AsRef<str>) -> Self {
        self.error_prefix = Some(msg.as_ref().to_string());
        self
    }

    /// The argv line as echoed by `trace`.
    pub fn trace_line(&self) -> String {
        if self.args.is_empty() {
            format!("+ {}", self.program)
        } else {
            format!("+ {} {}", self.program, self.args.join(" "))
        }
    }

    fn echo(&self) {
        if self.trace {
            println!("{}", self.trace_line());
        }
    }

    fn failure(&self, code: i32, stderr: &str) -> Error {
        let prefix = self
            .error_prefix
            .clone()
            .unwrap_or_else(|| format!("'{}' failed", self.program));

        let message = if stderr.is_empty() {
            format!("{} (exit code {})", prefix, code)
        } else {
            format!("{} (exit code {}):\n{}", prefix, code, stderr)
        };
        Error::new(ExitStatusError { code }).context(message)
    }

    /// Run the command and capture output.
    pub fn run(self) -> Result<CommandResult> {
        self.echo();

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .with_context(|| format!("Failed to execute '{}'. Is it installed?", self.program))?;

        let result = CommandResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !self.allow_fail && !result.success() {
            return Err(self.failure(result.code(), result.stderr_trimmed()));
        }

        Ok(result)
    }

    /// Run the command with inherited stdio (interactive/streaming).
    ///
    /// Output goes directly to the terminal. Use for long-running commands
    /// where the operator should see progress (e.g., image builds).
    pub fn run_interactive(self) -> Result<ExitStatus> {
        self.echo();

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute '{}'. Is it installed?", self.program))?;

        if !self.allow_fail && !status.success() {
            return Err(self.failure(status.code().unwrap_or(-1), ""));
        }

        Ok(status)
    }
}
