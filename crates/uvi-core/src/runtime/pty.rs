//! Run a shell command inside a pseudo-terminal
//!
//! The child sees a real terminal on stdout/stderr, so tools like `uv` keep
//! their colours and progress output. Everything the child writes is relayed
//! to our own output as it arrives and captured for later inspection.

use super::{ExecutionResult, Executor};
use crate::command::Command;
use anyhow::{Context, Result};
use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use std::io::{self, Read, Write};
use tracing::{debug, warn};

const READ_CHUNK: usize = 4096;

/// Linux reports EIO on the master once every slave handle is closed
#[cfg(unix)]
const EIO: i32 = 5;

/// Executes commands in a PTY, relaying output to `W`
pub struct PtyExecutor<W> {
    out: W,
    size: PtySize,
}

impl PtyExecutor<io::Stdout> {
    /// Executor relaying to the process's stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PtyExecutor<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            size: PtySize {
                rows: 24,
                cols: 80,
                pixel_width: 0,
                pixel_height: 0,
            },
        }
    }

    /// Match the PTY to the invoking terminal
    pub fn with_size(mut self, rows: u16, cols: u16) -> Self {
        if rows > 0 && cols > 0 {
            self.size.rows = rows;
            self.size.cols = cols;
        }
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a chunk through to the relay, disabling it on failure
    fn relay(&mut self, chunk: &[u8], relaying: &mut bool) {
        if !*relaying {
            return;
        }
        if let Err(e) = self.out.write_all(chunk).and_then(|_| self.out.flush()) {
            warn!(error = %e, "output relay failed, continuing capture only");
            *relaying = false;
        }
    }
}

impl<W: Write> Executor for PtyExecutor<W> {
    fn run(&mut self, command: &Command) -> Result<ExecutionResult> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(self.size)
            .context("Failed to allocate a pseudo-terminal")?;

        let mut builder = shell_command(command);
        if let Ok(cwd) = std::env::current_dir() {
            builder.cwd(cwd);
        }

        let mut child = pair
            .slave
            .spawn_command(builder)
            .with_context(|| format!("Failed to run: {}", command))?;
        debug!(command = %command, pid = ?child.process_id(), "spawned");

        // Only the child may hold the slave end, otherwise the read loop never sees EOF
        drop(pair.slave);

        let mut reader = pair
            .master
            .try_clone_reader()
            .context("Failed to read from pseudo-terminal")?;

        let mut relaying = true;
        let (captured, read_error) = drain(&mut reader, |chunk| self.relay(chunk, &mut relaying));

        let aborted = read_error.is_some();
        if let Some(e) = read_error {
            warn!(error = %e, command = %command, "reading child output failed");
        }

        // Nobody drains the PTY any more, so a live child could block forever on write
        if aborted && matches!(child.try_wait(), Ok(None)) {
            if let Err(e) = child.kill() {
                warn!(error = %e, "failed to stop child after read error");
            }
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for: {}", command))?;
        drop(pair.master);

        let exit_code = status.exit_code() as i32;
        debug!(command = %command, exit_code, "finished");

        Ok(ExecutionResult {
            exit_code,
            captured_output: captured.finish(),
        })
    }
}

/// Read `reader` until end of stream, handing each chunk to `relay` before capturing it.
///
/// Returns the capture and, if reading stopped on anything other than end of
/// stream, the error that stopped it.
fn drain<R: Read + ?Sized>(
    reader: &mut R,
    mut relay: impl FnMut(&[u8]),
) -> (Utf8Accumulator, Option<io::Error>) {
    let mut captured = Utf8Accumulator::default();
    let mut buf = [0u8; READ_CHUNK];

    loop {
        match reader.read(&mut buf) {
            Ok(0) => return (captured, None),
            Ok(n) => {
                let chunk = &buf[..n];
                relay(chunk);
                captured.push(chunk);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if is_end_of_stream(&e) => return (captured, None),
            Err(e) => return (captured, Some(e)),
        }
    }
}

#[cfg(unix)]
fn shell_command(command: &Command) -> CommandBuilder {
    let mut builder = CommandBuilder::new("sh");
    builder.args(["-c", command.as_str()]);
    builder
}

#[cfg(windows)]
fn shell_command(command: &Command) -> CommandBuilder {
    let mut builder = CommandBuilder::new("cmd.exe");
    builder.args(["/C", command.as_str()]);
    builder
}

#[cfg(unix)]
fn is_end_of_stream(e: &io::Error) -> bool {
    e.raw_os_error() == Some(EIO)
}

#[cfg(not(unix))]
fn is_end_of_stream(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::BrokenPipe
}

/// Decodes a byte stream to text, replacing invalid sequences.
///
/// A multi-byte character split across chunks is held back until the rest
/// arrives, so chunk boundaries never produce replacement characters.
#[derive(Debug, Default)]
struct Utf8Accumulator {
    text: String,
    pending: Vec<u8>,
}

impl Utf8Accumulator {
    fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    self.pending.clear();
                    return;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    self.text
                        .push_str(&String::from_utf8_lossy(&self.pending[..valid_up_to]));
                    match e.error_len() {
                        // Incomplete sequence at the end: wait for more bytes
                        None => {
                            self.pending.drain(..valid_up_to);
                            return;
                        }
                        Some(len) => {
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid_up_to + len);
                        }
                    }
                }
            }
        }
    }

    fn finish(mut self) -> String {
        if !self.pending.is_empty() {
            self.text.push_str(&String::from_utf8_lossy(&self.pending));
        }
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(chunks: &[&[u8]]) -> String {
        let mut acc = Utf8Accumulator::default();
        for chunk in chunks {
            acc.push(chunk);
        }
        acc.finish()
    }

    #[test]
    fn test_split_multibyte_char_is_reassembled() {
        let bytes = "héllo ✓".as_bytes();
        let (a, b) = bytes.split_at(2);
        assert_eq!(decode(&[a, b]), "héllo ✓");

        let check = "✓".as_bytes();
        assert_eq!(decode(&[&check[..1], &check[1..2], &check[2..]]), "✓");
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        assert_eq!(decode(&[&b"ok\xffok"[..]]), "ok\u{FFFD}ok");
        assert_eq!(decode(&[&b"a\xe2\x9c"[..]]), "a\u{FFFD}");
    }

    /// Reader yielding a fixed sequence of reads
    struct ScriptedReader(std::collections::VecDeque<io::Result<Vec<u8>>>);

    impl ScriptedReader {
        fn new(reads: Vec<io::Result<Vec<u8>>>) -> Self {
            Self(reads.into())
        }
    }

    impl Read for ScriptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(Ok(bytes)) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_read_failure_keeps_partial_capture() {
        let mut reader = ScriptedReader::new(vec![
            Ok(b"abc".to_vec()),
            Err(io::Error::new(io::ErrorKind::Other, "device gone")),
            Ok(b"never read".to_vec()),
        ]);
        let mut relayed = Vec::new();

        let (captured, error) = drain(&mut reader, |chunk| relayed.extend_from_slice(chunk));

        assert_eq!(captured.finish(), "abc");
        assert_eq!(relayed, b"abc");
        assert_eq!(error.map(|e| e.kind()), Some(io::ErrorKind::Other));
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let mut reader = ScriptedReader::new(vec![
            Ok(b"one ".to_vec()),
            Err(io::Error::from(io::ErrorKind::Interrupted)),
            Ok(b"two".to_vec()),
        ]);

        let (captured, error) = drain(&mut reader, |_| {});

        assert_eq!(captured.finish(), "one two");
        assert!(error.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_eio_ends_stream_cleanly() {
        let mut reader = ScriptedReader::new(vec![
            Ok(b"done\r\n".to_vec()),
            Err(io::Error::from_raw_os_error(EIO)),
        ]);
        let mut relayed = Vec::new();

        let (captured, error) = drain(&mut reader, |chunk| relayed.extend_from_slice(chunk));

        assert!(error.is_none());
        assert_eq!(captured.finish(), "done\r\n");
        assert_eq!(relayed, b"done\r\n");
    }

    #[cfg(unix)]
    mod live {
        use super::super::*;

        fn run(line: &str) -> (ExecutionResult, Vec<u8>) {
            let mut executor = PtyExecutor::new(Vec::new());
            let result = executor.run(&Command::new(line)).unwrap();
            (result, executor.into_inner())
        }

        #[test]
        fn test_success_captures_output() {
            let (result, _) = run("printf 'hello from child\\n'");
            assert_eq!(result.exit_code, 0);
            assert!(result.captured_output.contains("hello from child"));
        }

        #[test]
        fn test_exit_code_is_propagated() {
            let (result, relayed) = run("exit 3");
            assert_eq!(result.exit_code, 3);
            assert!(result.captured_output.is_empty());
            assert!(relayed.is_empty());
        }

        #[test]
        fn test_child_sees_a_terminal() {
            let (result, _) = run("if [ -t 1 ]; then echo is-tty; else echo no-tty; fi");
            assert!(result.captured_output.contains("is-tty"));
        }

        #[test]
        fn test_stderr_is_combined() {
            let (result, _) = run("echo to-out; echo to-err 1>&2; exit 4");
            assert_eq!(result.exit_code, 4);
            let out = result.captured_output.find("to-out").unwrap();
            let err = result.captured_output.find("to-err").unwrap();
            assert!(out < err);
        }

        #[test]
        fn test_relay_matches_capture() {
            let (result, relayed) =
                run("i=0; while [ $i -lt 200 ]; do echo line-$i-✓; i=$((i+1)); done");
            assert_eq!(result.exit_code, 0);
            assert_eq!(String::from_utf8(relayed).unwrap(), result.captured_output);
            assert!(result.captured_output.contains("line-199-✓"));
        }

        /// Writer that accepts `limit` bytes and then fails
        struct BrokenPipeAfter {
            limit: usize,
            written: Vec<u8>,
        }

        impl Write for BrokenPipeAfter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                let room = self.limit - self.written.len();
                if room == 0 {
                    return Err(io::Error::from(io::ErrorKind::BrokenPipe));
                }
                let n = room.min(buf.len());
                self.written.extend_from_slice(&buf[..n]);
                Ok(n)
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        #[test]
        fn test_relay_failure_keeps_capturing() {
            let mut executor = PtyExecutor::new(BrokenPipeAfter {
                limit: 4,
                written: Vec::new(),
            });
            let result = executor
                .run(&Command::new("echo first; sleep 0.2; echo second"))
                .unwrap();
            let relayed = executor.into_inner().written;

            assert_eq!(result.exit_code, 0);
            assert_eq!(relayed, b"firs");
            assert!(result.captured_output.contains("first"));
            assert!(result.captured_output.contains("second"));
        }
    }
}
