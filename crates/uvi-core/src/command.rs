//! Assembly of the shell commands handed to `uv`

use crate::answers::UserAnswers;
use crate::project::ProjectSpec;
use std::fmt;

/// A fully assembled shell command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(String);

impl Command {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wrap text in POSIX single quotes
pub fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Build the `uv init` command for a project
pub fn init_command(uv: &str, project: &ProjectSpec, answers: &UserAnswers) -> Command {
    let mut parts = vec![
        uv.to_string(),
        "init".to_string(),
        project.name.clone(),
        format!("--{}", project.project_type.name()),
        "--python".to_string(),
        answers.version.clone(),
    ];

    if !project.project_type.is_script() {
        if let Some(details) = &answers.details {
            parts.push("--description".to_string());
            parts.push(shell_quote(&details.description));
            parts.push("--vcs".to_string());
            parts.push(if details.vcs { "git" } else { "none" }.to_string());
            if !details.readme {
                parts.push("--no-readme".to_string());
            }
        }
    }

    Command::new(parts.join(" "))
}

/// Build the command that installs a missing Python version
pub fn install_command(uv: &str, version: &str) -> Command {
    Command::new(format!("{} python install {}", uv, version))
}
