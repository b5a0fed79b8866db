// clipboard.rs

use std::io::{self, Read, Write};
use std::process::{Child, ChildStdout, Stdio};

use bytes::Bytes;
use tracing::{debug, warn};

use crate::buffer::read_all;
use crate::error::ClipError;
use crate::session::ClipboardCommand;
use crate::util::write_ignore_broken_pipe;

pub const CHUNK_SIZE: usize = 4096;

fn spawn(cmd: &ClipboardCommand, stdin: Stdio, stdout: Stdio) -> Result<Child, ClipError> {
    debug!(command = %cmd, "spawning clipboard command");
    cmd.command()
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| ClipError::spawn(cmd.to_string(), e))
}

fn pipe_error(cmd: &ClipboardCommand, source: io::Error) -> ClipError {
    ClipError::Pipe { command: cmd.to_string(), source }
}

/// Feeds `payload` to the copy command and waits for it to exit.
pub fn copy(cmd: &ClipboardCommand, payload: &[u8]) -> Result<(), ClipError> {
    let mut child = spawn(cmd, Stdio::piped(), Stdio::null())?;

    // Dropping stdin closes the pipe so the child sees end-of-input.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(payload),
        None => Ok(()),
    };

    let status = child.wait().map_err(|e| pipe_error(cmd, e))?;
    if !status.success() {
        return Err(ClipError::CommandFailed { command: cmd.to_string(), status });
    }
    written.map_err(|e| pipe_error(cmd, e))?;
    debug!(command = %cmd, bytes = payload.len(), "copied to clipboard");
    Ok(())
}

/// Streams the paste command's output into `out` in `CHUNK_SIZE` pieces.
/// Returns the number of bytes forwarded.
pub fn paste_to<W: Write>(cmd: &ClipboardCommand, mut out: W) -> Result<u64, ClipError> {
    let mut child = spawn(cmd, Stdio::null(), Stdio::piped())?;
    let mut total = 0u64;

    if let Some(mut stdout) = child.stdout.take() {
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let n = match stdout.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    abandon(&mut child, Some(stdout));
                    return Err(pipe_error(cmd, e));
                }
            };
            if let Err(e) = write_ignore_broken_pipe(&mut out, &chunk[..n]) {
                abandon(&mut child, Some(stdout));
                return Err(ClipError::Stdout(e));
            }
            total += n as u64;
        }
    }

    finish_paste(cmd, &mut child)?;
    debug!(command = %cmd, bytes = total, "pasted from clipboard");
    Ok(total)
}

/// Runs the paste command and returns everything it printed.
pub fn paste(cmd: &ClipboardCommand) -> Result<Bytes, ClipError> {
    let mut child = spawn(cmd, Stdio::null(), Stdio::piped())?;
    let content = match child.stdout.take() {
        Some(stdout) => read_all(stdout),
        None => Ok(Bytes::new()),
    };
    let content = match content {
        Ok(content) => content,
        Err(e) => {
            let _ = child.wait();
            return Err(pipe_error(cmd, e));
        }
    };
    finish_paste(cmd, &mut child)?;
    debug!(command = %cmd, bytes = content.len(), "captured clipboard");
    Ok(content)
}

// Closes our end of the pipe before reaping, so a child still writing
// cannot block the wait.
fn abandon(child: &mut Child, stdout: Option<ChildStdout>) {
    drop(stdout);
    let _ = child.kill();
    let _ = child.wait();
}

// Paste tools exit non-zero on an empty clipboard; whatever they printed
// still counts.
fn finish_paste(cmd: &ClipboardCommand, child: &mut Child) -> Result<(), ClipError> {
    let status = child.wait().map_err(|e| pipe_error(cmd, e))?;
    if !status.success() {
        warn!(command = %cmd, %status, "paste command exited unsuccessfully");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sh(script: &str) -> ClipboardCommand {
        ClipboardCommand::new("sh", &["-c", script])
    }

    #[test]
    fn copy_delivers_the_whole_payload() {
        let dir = tempfile::tempdir().unwrap();
        let sink = dir.path().join("sink");
        let cmd = sh(&format!("cat > '{}'", sink.display()));
        let payload: Vec<u8> = (0..CHUNK_SIZE * 3 + 5).map(|i| (i % 256) as u8).collect();

        copy(&cmd, &payload).unwrap();

        assert_eq!(std::fs::read(&sink).unwrap(), payload);
    }

    #[test]
    fn copy_reports_nonzero_exit() {
        let err = copy(&sh("cat > /dev/null; exit 3"), b"x").unwrap_err();
        assert!(matches!(err, ClipError::CommandFailed { .. }));
    }

    #[test]
    fn missing_program_is_command_not_found() {
        let cmd = ClipboardCommand::new("clipyank-no-such-tool", &["-o"]);
        let err = copy(&cmd, b"x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command not found. Is 'clipyank-no-such-tool -o' installed and in your PATH?"
        );
        assert!(matches!(
            paste_to(&cmd, Vec::new()),
            Err(ClipError::CommandNotFound { .. })
        ));
    }

    #[test]
    fn paste_to_forwards_output_larger_than_a_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let data: Vec<u8> = (0..CHUNK_SIZE * 2 + 123).map(|i| (i % 7) as u8).collect();
        std::fs::write(&source, &data).unwrap();

        let mut out = Vec::new();
        let n = paste_to(&sh(&format!("cat '{}'", source.display())), &mut out).unwrap();

        assert_eq!(n, data.len() as u64);
        assert_eq!(out, data);
    }

    #[test]
    fn abandon_reaps_a_child_that_keeps_writing() {
        let mut child = sh("yes")
            .command()
            .stdout(Stdio::piped())
            .spawn()
            .unwrap();
        let stdout = child.stdout.take();

        abandon(&mut child, stdout);

        assert!(child.try_wait().unwrap().is_some());
    }

    #[test]
    fn paste_captures_output_even_on_failure_status() {
        let content = paste(&sh("printf 'old\\0clip'; exit 1")).unwrap();
        assert_eq!(&content[..], b"old\0clip");
    }
}
