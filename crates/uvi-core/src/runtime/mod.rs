//! Child process execution and missing-interpreter recovery
//!
//! This module provides:
//! - PTY-backed command execution with live output relay
//! - Detection of uv's "no interpreter found" failure
//! - The one-shot install-and-retry protocol

pub mod classify;
pub mod pty;
pub mod recovery;

use crate::command::Command;
use anyhow::Result;

pub use classify::detect_missing_version;
pub use pty::PtyExecutor;
pub use recovery::{run_with_recovery, Outcome};

/// Result of running one child process to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    /// Everything the child wrote, in arrival order.
    ///
    /// Matches what was relayed to the terminal as long as the relay keeps
    /// working; if writing to our output fails, capture continues alone.
    pub captured_output: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs commands to completion, one at a time
pub trait Executor {
    fn run(&mut self, command: &Command) -> Result<ExecutionResult>;
}
