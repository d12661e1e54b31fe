//! uvi core - interactive front-end for `uv init`
//!
//! This library asks a handful of questions, turns the answers into a
//! `uv init` command, and runs it inside a pseudo-terminal so uv's coloured
//! output reaches the user unchanged. When uv fails because the requested
//! Python version is not installed, the user is offered
//! `uv python install <version>` and the init is retried once.
//!
//! # Architecture
//!
//! - **Answers** - [`project`] validates positional arguments, [`answers`]
//!   asks the questions through a [`prompt::Prompter`]
//! - **Commands** - [`command`] assembles the shell command lines
//! - **Runtime** - [`runtime`] executes commands in a PTY and handles the
//!   install-and-retry recovery
//! - **Session** - [`session::run`] ties the steps together
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter

pub mod answers;
pub mod command;
pub mod config;
pub mod project;
pub mod prompt;
pub mod runtime;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types for convenience
pub use command::Command;
pub use config::{Config, PythonSupport};
pub use project::{validate_args, ProjectSpec, ProjectType, UsageError};
pub use prompt::{LinePrompter, Prompter};
pub use runtime::{ExecutionResult, Executor, Outcome, PtyExecutor};
pub use session::run;

/// Exit code for a run stopped with Ctrl+C
pub const INTERRUPT_EXIT_CODE: i32 = 130;
