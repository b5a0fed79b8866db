// commands.rs

use std::io::{self, Read, Write};

use bytes::Bytes;
use tracing::{debug, warn};

use crate::buffer::read_all;
use crate::cli::Mode;
use crate::clipboard;
use crate::config::Config;
use crate::error::ClipError;
use crate::history::HistoryStore;
use crate::session::{ClipboardCommand, Session};
use crate::util::{flush_ignore_broken_pipe, write_ignore_broken_pipe};

/// Printed after every entry by `--show`.
pub const SEPARATOR: &[u8] = b"\n--------------------\n";

pub fn run(mode: Mode, config: &Config) -> anyhow::Result<()> {
    let history = config.history_path.as_deref().map(HistoryStore::new);
    let stdout = io::stdout().lock();
    if !mode.uses_clipboard() {
        show(history.as_ref(), stdout)?;
        return Ok(());
    }

    let session = Session::from_env();
    debug!(?session, "selected clipboard commands");
    match mode {
        Mode::Show => unreachable!("handled above"),
        Mode::Send => send(
            &session.copy_command(),
            history.as_ref(),
            io::stdin().lock(),
            stdout,
        )?,
        Mode::Recv => recv(&session.paste_command(), stdout)?,
        Mode::Exchange => exchange(
            &session.copy_command(),
            &session.paste_command(),
            history.as_ref(),
            io::stdin().lock(),
            stdout,
        )?,
    }
    Ok(())
}

/// Copies all of `input` to the clipboard, records it, and echoes it to `out`.
/// Empty input spawns nothing and records nothing.
pub fn send<R: Read, W: Write>(
    copy_cmd: &ClipboardCommand,
    history: Option<&HistoryStore>,
    input: R,
    mut out: W,
) -> Result<(), ClipError> {
    let payload = read_all(input).map_err(ClipError::Stdin)?;
    debug!(bytes = payload.len(), "read standard input");
    if !payload.is_empty() {
        clipboard::copy(copy_cmd, &payload)?;
        record(history, payload.clone());
    }
    emit(&mut out, &payload)
}

pub fn recv<W: Write>(paste_cmd: &ClipboardCommand, mut out: W) -> Result<(), ClipError> {
    clipboard::paste_to(paste_cmd, &mut out)?;
    flush_ignore_broken_pipe(&mut out).map_err(ClipError::Stdout)
}

/// Puts `input` on the clipboard and prints what was there before.
pub fn exchange<R: Read, W: Write>(
    copy_cmd: &ClipboardCommand,
    paste_cmd: &ClipboardCommand,
    history: Option<&HistoryStore>,
    input: R,
    mut out: W,
) -> Result<(), ClipError> {
    let payload = read_all(input).map_err(ClipError::Stdin)?;
    let previous = clipboard::paste(paste_cmd)?;
    if !payload.is_empty() {
        clipboard::copy(copy_cmd, &payload)?;
        record(history, payload);
    }
    emit(&mut out, &previous)
}

/// Prints each history entry, newest first. Missing or unreadable history
/// prints nothing.
pub fn show<W: Write>(history: Option<&HistoryStore>, mut out: W) -> Result<(), ClipError> {
    let Some(store) = history else {
        warn!("no home directory; history is disabled");
        return Ok(());
    };
    let log = match store.load() {
        Ok(log) => log,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "could not read history");
            return Ok(());
        }
    };
    if log.is_empty() {
        debug!(path = %store.path().display(), "history is empty");
    }
    for entry in log.iter() {
        write_ignore_broken_pipe(&mut out, entry.data()).map_err(ClipError::Stdout)?;
        write_ignore_broken_pipe(&mut out, SEPARATOR).map_err(ClipError::Stdout)?;
    }
    flush_ignore_broken_pipe(&mut out).map_err(ClipError::Stdout)
}

fn record(history: Option<&HistoryStore>, payload: Bytes) {
    let Some(store) = history else {
        warn!("no home directory; not recording history");
        return;
    };
    if let Err(e) = store.append(payload) {
        warn!(path = %store.path().display(), error = %e, "could not update history");
    }
}

fn emit<W: Write>(out: &mut W, bytes: &[u8]) -> Result<(), ClipError> {
    write_ignore_broken_pipe(&mut *out, bytes).map_err(ClipError::Stdout)?;
    flush_ignore_broken_pipe(out).map_err(ClipError::Stdout)
}
