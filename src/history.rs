// history.rs
//
// On-disk format, newest record first:
//
//     <decimal byte count>\n<raw bytes>\n
//
// The file is only ever rewritten whole: new entry plus the surviving old
// ones go to `<path>.tmp`, which is then renamed over the original.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, warn};

pub const HISTORY_LIMIT: usize = 10;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HistoryEntry {
    data: Bytes,
    /// The record exactly as read from disk, size line and trailing newline
    /// included. Written back untouched.
    record: Option<Bytes>,
}

impl HistoryEntry {
    pub fn new(data: Bytes) -> Self {
        Self { data, record: None }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        if let Some(record) = &self.record {
            return w.write_all(record);
        }
        writeln!(w, "{}", self.size())?;
        w.write_all(&self.data)?;
        w.write_all(b"\n")
    }
}

/// Newest-first list of entries, never longer than `HISTORY_LIMIT`.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a history file. Reading stops at the first malformed record;
    /// everything before it is kept.
    pub fn parse(raw: &Bytes) -> Self {
        let mut log = Self::new();
        let mut pos = 0;
        while pos < raw.len() && log.entries.len() < HISTORY_LIMIT {
            match parse_record(raw, pos) {
                Some((entry, next)) => {
                    log.entries.push_back(entry);
                    pos = next;
                }
                None => {
                    warn!(offset = pos, "history file has a malformed record; ignoring the rest");
                    break;
                }
            }
        }
        log
    }

    /// Adds `entry` as the newest item, evicting the oldest past the limit.
    pub fn push_front(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for entry in &self.entries {
            entry.write_to(&mut w)?;
        }
        Ok(())
    }
}

fn parse_record(raw: &Bytes, pos: usize) -> Option<(HistoryEntry, usize)> {
    let rest = &raw[pos..];
    let eol = rest.iter().position(|&b| b == b'\n')?;
    let size: usize = std::str::from_utf8(&rest[..eol]).ok()?.trim().parse().ok()?;
    let start = pos + eol + 1;
    let end = start.checked_add(size)?;
    if end > raw.len() {
        return None;
    }
    let mut entry = HistoryEntry::new(raw.slice(start..end));
    // The trailing newline may be missing on the very last record; such a
    // record is rewritten in canonical form.
    let next = match raw.get(end) {
        Some(&b'\n') => {
            entry.record = Some(raw.slice(pos..end + 1));
            end + 1
        }
        None => end,
        Some(_) => return None,
    };
    Some((entry, next))
}

/// The history file at a fixed path.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    /// Reads the log; a missing file is an empty history.
    pub fn load(&self) -> io::Result<HistoryLog> {
        match fs::read(&self.path) {
            Ok(raw) => Ok(HistoryLog::parse(&Bytes::from(raw))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HistoryLog::new()),
            Err(e) => Err(e),
        }
    }

    /// Prepends `data` and rewrites the file through a temp file + rename.
    pub fn append(&self, data: Bytes) -> io::Result<()> {
        let mut log = match self.load() {
            Ok(log) => log,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read history; starting fresh");
                HistoryLog::new()
            }
        };
        log.push_front(HistoryEntry::new(data));

        let tmp = self.tmp_path();
        let result = File::create(&tmp).and_then(|mut file| {
            log.write_to(&mut file)?;
            file.sync_all()
        });
        if let Err(e) = result.and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        debug!(path = %self.path.display(), entries = log.len(), "history updated");
        Ok(())
    }
}
