//! Interactive questions asked before running `uv init`

use crate::config::PythonSupport;
use crate::project::ProjectType;
use crate::prompt::{Prompter, RETRY_MARKER};
use std::io;

/// Extra answers collected for every project type except `script`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub description: String,
    /// Initialise a git repository
    pub vcs: bool,
    /// Create a README
    pub readme: bool,
}

/// Validated answers for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAnswers {
    pub version: String,
    /// `None` for scripts
    pub details: Option<ProjectDetails>,
}

/// Ask for the Python version until a supported one (or blank) is given
pub fn ask_version<P: Prompter + ?Sized>(
    prompter: &mut P,
    python: &PythonSupport,
) -> io::Result<String> {
    loop {
        let answer = prompter
            .input("version", Some("enter for default"))?
            .to_lowercase();

        if let Some(version) = python.resolve(&answer) {
            return Ok(version);
        }

        prompter.error(&format!(
            "invalid version: {} ({} only)",
            answer,
            python.range_label()
        ))?;
    }
}

/// Parse a yes/no answer
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask a yes/no question until it gets a recognisable answer
pub fn ask_yes_no<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> io::Result<bool> {
    let mut marker = "";
    loop {
        let prompt = format!("{}{}", marker, question);
        if let Some(answer) = parse_yes_no(&prompter.input(&prompt, Some("y/n"))?) {
            return Ok(answer);
        }
        marker = RETRY_MARKER;
    }
}

pub fn ask_description<P: Prompter + ?Sized>(prompter: &mut P) -> io::Result<String> {
    prompter.input("desc", None)
}

/// Run the full questionnaire for a project type
pub fn collect<P: Prompter + ?Sized>(
    prompter: &mut P,
    project_type: ProjectType,
    python: &PythonSupport,
) -> io::Result<UserAnswers> {
    let version = ask_version(prompter, python)?;

    if project_type.is_script() {
        return Ok(UserAnswers {
            version,
            details: None,
        });
    }

    let description = ask_description(prompter)?;
    let vcs = ask_yes_no(prompter, "vcs")?;
    let readme = ask_yes_no(prompter, "readme")?;

    Ok(UserAnswers {
        version,
        details: Some(ProjectDetails {
            description,
            vcs,
            readme,
        }),
    })
}
