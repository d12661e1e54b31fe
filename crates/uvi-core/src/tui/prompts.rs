//! Charm-style prompts using cliclack

use crate::prompt::Prompter;
use crate::runtime::Outcome;
use std::io::{self, IsTerminal};

/// Renders questions with cliclack.
///
/// Ctrl+C while a question is open surfaces as `io::ErrorKind::Interrupted`.
#[derive(Debug, Default)]
pub struct ClackPrompter;

impl ClackPrompter {
    pub fn new(title: &str) -> io::Result<Self> {
        cliclack::intro(title)?;
        Ok(Self)
    }

    /// Close the frame opened by [`ClackPrompter::new`]
    pub fn finish(&mut self, outcome: &Outcome) -> io::Result<()> {
        match closing_line(outcome) {
            Ok(message) => cliclack::outro(message),
            Err(message) => cliclack::outro_cancel(message),
        }
    }

    /// Close the frame after the session itself failed
    pub fn abort(&mut self, message: &str) -> io::Result<()> {
        cliclack::outro_cancel(message)
    }
}

/// Outro text, `Err` when the frame should close as cancelled
fn closing_line(outcome: &Outcome) -> Result<String, String> {
    match outcome {
        Outcome::Succeeded => Ok("Project created".to_string()),
        Outcome::Retried {
            version,
            exit_code: 0,
        } => Ok(format!("Project created with Python {}", version)),
        Outcome::Declined { version, .. } => Err(format!("Python {} not installed", version)),
        Outcome::RemediationFailed { version, .. } => {
            Err(format!("failed to install Python {}", version))
        }
        Outcome::Failed { exit_code } | Outcome::Retried { exit_code, .. } => {
            Err(format!("uv init exited with code {}", exit_code))
        }
    }
}

impl Prompter for ClackPrompter {
    fn input(&mut self, prompt: &str, hint: Option<&str>) -> io::Result<String> {
        let mut input = cliclack::input(prompt).required(false);
        if let Some(hint) = hint {
            input = input.placeholder(hint);
        }
        let answer: String = input.interact()?;
        Ok(answer.trim().to_string())
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::error(message)
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        cliclack::log::info(message)
    }
}

/// Both ends of the conversation are a terminal
pub fn is_interactive() -> bool {
    console::user_attended() && io::stdin().is_terminal()
}
