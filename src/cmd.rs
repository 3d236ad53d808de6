// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

//! Execution of the package manager commands.
//!
//! The parsers only see the captured lines and the exit code, so anything able to produce
//! a [`CmdOutput`] can stand in for the real system (see the tests).

use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Captured result of a finished command
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CmdOutput {
    pub command: String,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    /// `-1` when the process was killed by a signal
    pub code: i32,
}

impl CmdOutput {
    pub fn new(command: String, stdout: &[u8], stderr: &[u8], code: Option<i32>) -> Self {
        Self {
            command,
            stdout: Self::lines(stdout),
            stderr: Self::lines(stderr),
            code: code.unwrap_or(-1),
        }
    }

    fn lines(raw: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(raw)
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl std::fmt::Display for CmdOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Execute command:\n{}\nstatus:\n{}\nstdout:\n{}\nstderr:\n{}",
            self.command,
            self.code,
            self.stdout.join("\n"),
            self.stderr.join("\n")
        )
    }
}

/// Runs an external command to completion.
///
/// A non-zero exit code is not an error, callers interpret it. Only failing to start the
/// process is.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CmdOutput>;
}

/// Runs commands on the local system
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CmdOutput> {
        let mut c = Command::new(program);
        // We parse column labels, they must not be translated
        c.args(args).env("LC_ALL", "C");
        let output = c
            .output()
            .with_context(|| format!("Running '{program}'"))?;
        let cmd_output = CmdOutput::new(
            format!("{c:?}"),
            &output.stdout,
            &output.stderr,
            output.status.code(),
        );
        debug!("{}", cmd_output);
        Ok(cmd_output)
    }
}
