//! Configuration tables shared by argument validation, prompts and command assembly

use crate::project::ProjectType;

/// Environment variable overriding the `uv` program
pub const UV_BIN_ENV: &str = "UVI_UV_BIN";

/// Supported Python interpreter versions, as an inclusive range of minor versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonSupport {
    pub major: u32,
    pub min_minor: u32,
    pub max_minor: u32,
    /// Minor version used when the answer is left blank
    pub default_minor: u32,
}

impl PythonSupport {
    /// Version string used for an empty answer
    pub fn default_version(&self) -> String {
        format!("{}.{}", self.major, self.default_minor)
    }

    /// Human-readable range, e.g. `3.7-3.14`
    pub fn range_label(&self) -> String {
        format!(
            "{major}.{}-{major}.{}",
            self.min_minor,
            self.max_minor,
            major = self.major
        )
    }

    /// Resolve a user answer to a supported version.
    ///
    /// An empty answer resolves to the default version. Returns `None` when the
    /// answer names anything outside the supported range.
    pub fn resolve(&self, answer: &str) -> Option<String> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Some(self.default_version());
        }

        (self.min_minor..=self.max_minor)
            .map(|minor| format!("{}.{}", self.major, minor))
            .find(|candidate| candidate == answer)
    }
}

impl Default for PythonSupport {
    fn default() -> Self {
        Self {
            major: 3,
            min_minor: 7,
            max_minor: 14,
            default_minor: 13,
        }
    }
}

/// Runtime configuration for a uvi session
#[derive(Debug, Clone)]
pub struct Config {
    /// Project types accepted on the command line
    pub project_types: Vec<ProjectType>,
    pub python: PythonSupport,
    /// Program used for both `init` and `python install`
    pub uv_program: String,
}

impl Config {
    /// Built-in tables with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(program) = std::env::var(UV_BIN_ENV) {
            if !program.trim().is_empty() {
                config.uv_program = program;
            }
        }
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_types: ProjectType::ALL.to_vec(),
            python: PythonSupport::default(),
            uv_program: "uv".to_string(),
        }
    }
}
