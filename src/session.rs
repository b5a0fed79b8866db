// session.rs

use std::env;
use std::fmt;
use std::process::Command;

use itertools::Itertools;

/// Display server the clipboard commands are picked for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Session {
    Wayland,
    X11,
}

impl Session {
    pub fn from_env() -> Self {
        Self::from_session_type(env::var("XDG_SESSION_TYPE").ok().as_deref())
    }

    /// `XDG_SESSION_TYPE` value; anything but `wayland` (or nothing) is X11.
    pub fn from_session_type(value: Option<&str>) -> Self {
        match value {
            Some("wayland") => Session::Wayland,
            _ => Session::X11,
        }
    }

    pub fn copy_command(self) -> ClipboardCommand {
        match self {
            Session::Wayland => ClipboardCommand::new("wl-copy", &[]),
            Session::X11 => ClipboardCommand::new("xclip", &["-selection", "clipboard"]),
        }
    }

    pub fn paste_command(self) -> ClipboardCommand {
        match self {
            Session::Wayland => ClipboardCommand::new("wl-paste", &[]),
            Session::X11 => ClipboardCommand::new("xclip", &["-selection", "clipboard", "-o"]),
        }
    }
}

/// An external clipboard program plus its arguments, spawned without a shell.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ClipboardCommand {
    program: String,
    args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for ClipboardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            std::iter::once(&self.program).chain(&self.args).join(" ")
        )
    }
}
