//! Line-based prompting
//!
//! [`Prompter`] is the seam between the question logic in [`crate::answers`]
//! and whatever renders the questions. [`LinePrompter`] is the plain
//! implementation: it writes `prompt (hint) > ` and reads one line.

use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Renders a question and returns the trimmed answer line
pub trait Prompter {
    /// Ask for one line of input
    fn input(&mut self, prompt: &str, hint: Option<&str>) -> io::Result<String>;

    /// Report a rejected answer or failure
    fn error(&mut self, message: &str) -> io::Result<()>;

    /// Report progress between steps
    fn info(&mut self, message: &str) -> io::Result<()>;
}

/// Marker prefixed to a prompt that is asked again after a bad answer
pub const RETRY_MARKER: &str = "! ";

/// Plain prompter over arbitrary streams
pub struct LinePrompter<R, W, E> {
    input: R,
    output: W,
    diagnostics: E,
}

impl<R: BufRead, W: Write, E: Write> LinePrompter<R, W, E> {
    pub fn new(input: R, output: W, diagnostics: E) -> Self {
        Self {
            input,
            output,
            diagnostics,
        }
    }

    /// Consume the prompter, returning its output and diagnostic streams
    pub fn into_writers(self) -> (W, E) {
        (self.output, self.diagnostics)
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout, io::Stderr> {
    /// Prompter over the process's real stdin, stdout and stderr
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> Prompter for LinePrompter<R, W, E> {
    fn input(&mut self, prompt: &str, hint: Option<&str>) -> io::Result<String> {
        let label = match hint {
            Some(hint) => format!("{} {}", prompt.green(), format!("({})", hint).cyan()),
            None => prompt.green().to_string(),
        };
        write!(self.output, "{} > ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.diagnostics, "{} {}", "error:".red(), message)?;
        self.diagnostics.flush()
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.diagnostics, "{}", message.cyan())?;
        self.diagnostics.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_trimmed_line() {
        let mut prompter = LinePrompter::new(Cursor::new("  yes \n"), Vec::new(), Vec::new());
        let answer = prompter.input("vcs", Some("y/n")).unwrap();
        assert_eq!(answer, "yes");

        let (output, _) = prompter.into_writers();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("vcs"));
        assert!(output.contains("y/n"));
        assert!(output.ends_with(" > "));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new(), Vec::new());
        let err = prompter.input("desc", None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_errors_go_to_diagnostics() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new(), Vec::new());
        prompter.error("invalid version: 9.9").unwrap();

        let (output, diagnostics) = prompter.into_writers();
        assert!(output.is_empty());
        assert!(String::from_utf8(diagnostics)
            .unwrap()
            .contains("invalid version: 9.9"));
    }
}
