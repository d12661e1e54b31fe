//! Recognise uv's "missing interpreter" failure in captured output

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn missing_interpreter() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"No interpreter found for Python (\d+\.\d+)")
            .expect("missing interpreter pattern is valid")
    })
}

/// Pattern for the install hint naming exactly `version`
fn install_hint(version: &str) -> Option<Regex> {
    let pattern = format!(
        r"(?s)A managed Python download is available.*use `?uv python install {}`?(?:\D|$)",
        regex::escape(version)
    );
    Regex::new(&pattern).ok()
}

/// Extract the Python version uv could not find but offers to install.
///
/// Matches only when a "No interpreter found for Python V" line is followed,
/// anywhere later in the text, by the managed-download hint suggesting
/// `uv python install V` for the same `V`.
pub fn detect_missing_version(output: &str) -> Option<String> {
    for caps in missing_interpreter().captures_iter(output) {
        let (Some(whole), Some(version)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let Some(hint) = install_hint(version.as_str()) else {
            continue;
        };

        if hint.is_match(&output[whole.end()..]) {
            debug!(version = version.as_str(), "missing interpreter detected");
            return Some(version.as_str().to_string());
        }
    }

    None
}
