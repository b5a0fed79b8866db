// util.rs

use std::io::{self, Write};

/// `write_all` that treats a closed downstream pipe as success, so
/// `clipyank --show | head` does not end in an error.
pub fn write_ignore_broken_pipe<W: Write>(mut w: W, bytes: &[u8]) -> io::Result<()> {
    match w.write_all(bytes) {
        Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

pub fn flush_ignore_broken_pipe<W: Write>(mut w: W) -> io::Result<()> {
    match w.flush() {
        Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
