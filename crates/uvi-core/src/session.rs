//! One interactive `uv init` session, from questions to final exit code

use crate::answers;
use crate::command::init_command;
use crate::config::Config;
use crate::project::ProjectSpec;
use crate::prompt::Prompter;
use crate::runtime::{run_with_recovery, Executor, Outcome};
use anyhow::Result;
use tracing::debug;

/// Ask the questions, run `uv init`, and recover from a missing interpreter
pub fn run<P, E>(
    config: &Config,
    project: &ProjectSpec,
    prompter: &mut P,
    executor: &mut E,
) -> Result<Outcome>
where
    P: Prompter + ?Sized,
    E: Executor + ?Sized,
{
    let answers = answers::collect(prompter, project.project_type, &config.python)?;
    let command = init_command(&config.uv_program, project, &answers);
    debug!(command = %command, "assembled init command");

    run_with_recovery(executor, prompter, &config.uv_program, &command)
}
