// error.rs

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Failures that end the invocation. History problems never show up here;
/// they are logged and absorbed where they happen.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("Command not found. Is '{command}' installed and in your PATH?")]
    CommandNotFound { command: String },
    #[error("failed to spawn '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("i/o error talking to '{command}'")]
    Pipe {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("'{command}' exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },
    #[error("failed to read standard input")]
    Stdin(#[source] io::Error),
    #[error("failed to write standard output")]
    Stdout(#[source] io::Error),
}

impl ClipError {
    pub fn spawn(command: String, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ClipError::CommandNotFound { command }
        } else {
            ClipError::Spawn { command, source }
        }
    }
}
