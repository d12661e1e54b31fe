//! Project types and positional argument validation

use std::fmt;
use thiserror::Error;

/// Kinds of project `uv init` can scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Bare,
    Package,
    App,
    Lib,
    Script,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::Bare,
        ProjectType::Package,
        ProjectType::App,
        ProjectType::Lib,
        ProjectType::Script,
    ];

    /// One-letter code accepted on the command line
    pub fn code(&self) -> &'static str {
        match self {
            ProjectType::Bare => "b",
            ProjectType::Package => "p",
            ProjectType::App => "a",
            ProjectType::Lib => "l",
            ProjectType::Script => "s",
        }
    }

    /// Long name, also the `uv init --<name>` flag
    pub fn name(&self) -> &'static str {
        match self {
            ProjectType::Bare => "bare",
            ProjectType::Package => "package",
            ProjectType::App => "app",
            ProjectType::Lib => "lib",
            ProjectType::Script => "script",
        }
    }

    pub fn is_script(&self) -> bool {
        matches!(self, ProjectType::Script)
    }

    /// Look up a short code or long name in the given table
    pub fn lookup(arg: &str, table: &[ProjectType]) -> Option<ProjectType> {
        table
            .iter()
            .copied()
            .find(|t| t.code() == arg || t.name() == arg)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Invalid or missing positional arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("missing args: project type & project name")]
    MissingArgs,
    #[error("missing arg: project name")]
    MissingName,
    #[error("invalid project type: {0} (see uvi --help)")]
    InvalidType(String),
    #[error("invalid project name: {0}")]
    InvalidName(String),
    #[error("too many args: give only project type & project name")]
    TooManyArgs,
}

impl UsageError {
    /// Process exit code for usage errors
    pub const EXIT_CODE: i32 = 2;
}

/// Validated positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    pub project_type: ProjectType,
    pub name: String,
}

/// Check identifier syntax: XID_Start or `_`, then XID_Continue characters
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if unicode_ident::is_xid_start(first) || first == '_' => {}
        _ => return false,
    }
    chars.all(unicode_ident::is_xid_continue)
}

/// Validate raw positional arguments into a project spec
pub fn validate_args(args: &[String], table: &[ProjectType]) -> Result<ProjectSpec, UsageError> {
    match args {
        [] => Err(UsageError::MissingArgs),
        [ty] => {
            ProjectType::lookup(ty, table).ok_or_else(|| UsageError::InvalidType(ty.clone()))?;
            Err(UsageError::MissingName)
        }
        [ty, name] => {
            let project_type = ProjectType::lookup(ty, table)
                .ok_or_else(|| UsageError::InvalidType(ty.clone()))?;
            if !is_valid_name(name) {
                return Err(UsageError::InvalidName(name.clone()));
            }
            Ok(ProjectSpec {
                project_type,
                name: name.clone(),
            })
        }
        _ => Err(UsageError::TooManyArgs),
    }
}
