//! Test doubles for the prompt and execution seams

use crate::command::Command;
use crate::prompt::Prompter;
use crate::runtime::{ExecutionResult, Executor};
use anyhow::Result;
use std::collections::VecDeque;
use std::io;

/// Prompter replaying canned answers and recording everything shown
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub errors: Vec<String>,
    pub notices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, _hint: Option<&str>) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        self.notices.push(message.to_string());
        Ok(())
    }
}

/// Executor replaying canned results and recording what it ran
#[derive(Default)]
pub struct FakeExecutor {
    pub results: VecDeque<ExecutionResult>,
    pub ran: Vec<String>,
}

impl FakeExecutor {
    pub fn new(results: &[(i32, &str)]) -> Self {
        Self {
            results: results
                .iter()
                .map(|(code, out)| ExecutionResult {
                    exit_code: *code,
                    captured_output: out.to_string(),
                })
                .collect(),
            ran: Vec::new(),
        }
    }
}

impl Executor for FakeExecutor {
    fn run(&mut self, command: &Command) -> Result<ExecutionResult> {
        self.ran.push(command.to_string());
        self.results
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected command: {}", command))
    }
}
