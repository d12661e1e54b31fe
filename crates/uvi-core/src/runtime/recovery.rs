//! Install a missing Python version and retry, at most once

use super::classify::detect_missing_version;
use super::Executor;
use crate::answers::ask_yes_no;
use crate::command::{install_command, Command};
use crate::prompt::Prompter;
use anyhow::Result;
use tracing::debug;

/// How a run with recovery ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command succeeded on the first attempt
    Succeeded,
    /// The command failed with no recoverable cause
    Failed { exit_code: i32 },
    /// The user turned down installing the missing version
    Declined { version: String, exit_code: i32 },
    /// Installing the missing version failed; the command was not retried
    RemediationFailed { version: String, exit_code: i32 },
    /// The version was installed and the command ran a second time
    Retried { version: String, exit_code: i32 },
}

impl Outcome {
    /// Exit code of the last child process that ran
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Succeeded => 0,
            Outcome::Failed { exit_code }
            | Outcome::Declined { exit_code, .. }
            | Outcome::RemediationFailed { exit_code, .. }
            | Outcome::Retried { exit_code, .. } => *exit_code,
        }
    }
}

/// Run `command`, recovering once from a missing Python interpreter.
///
/// On a recognised failure the user is asked whether to install the missing
/// version with `uv python install`. If the install succeeds the command is
/// run again; its result is final even if it fails the same way.
pub fn run_with_recovery<E, P>(
    executor: &mut E,
    prompter: &mut P,
    uv: &str,
    command: &Command,
) -> Result<Outcome>
where
    E: Executor + ?Sized,
    P: Prompter + ?Sized,
{
    let first = executor.run(command)?;
    if first.success() {
        return Ok(Outcome::Succeeded);
    }

    let Some(version) = detect_missing_version(&first.captured_output) else {
        debug!(exit_code = first.exit_code, "failure not recoverable");
        return Ok(Outcome::Failed {
            exit_code: first.exit_code,
        });
    };

    if !ask_yes_no(prompter, &format!("install Python {}?", version))? {
        return Ok(Outcome::Declined {
            version,
            exit_code: first.exit_code,
        });
    }

    prompter.info(&format!("installing Python {}", version))?;
    let install = executor.run(&install_command(uv, &version))?;
    if !install.success() {
        prompter.error(&format!("failed to install Python {}", version))?;
        return Ok(Outcome::RemediationFailed {
            version,
            exit_code: install.exit_code,
        });
    }

    prompter.info("retrying init")?;
    let retry = executor.run(command)?;

    Ok(Outcome::Retried {
        version,
        exit_code: retry.exit_code,
    })
}
