// cli.rs

use std::ffi::OsStr;

use itertools::Itertools;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Send,
    Recv,
    Show,
    Exchange,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Send, Mode::Recv, Mode::Show, Mode::Exchange];

    pub fn flag(self) -> &'static str {
        match self {
            Mode::Send => "--send",
            Mode::Recv => "--recv",
            Mode::Show => "--show",
            Mode::Exchange => "--exchange",
        }
    }

    /// `--show` only reads the history file and never touches the clipboard.
    pub fn uses_clipboard(self) -> bool {
        !matches!(self, Mode::Show)
    }

    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.flag() == flag)
    }
}

/// Arguments after the program name. Exactly one known flag is accepted.
pub fn parse_args<S: AsRef<OsStr>>(args: &[S]) -> Option<Mode> {
    match args {
        [flag] => flag.as_ref().to_str().and_then(Mode::from_flag),
        _ => None,
    }
}

pub fn usage(program: &str) -> String {
    format!("Usage: {} {}", program, Mode::ALL.iter().map(|m| m.flag()).join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_known_flag_parses() {
        assert_eq!(parse_args(&["--send"]), Some(Mode::Send));
        assert_eq!(parse_args(&["--recv"]), Some(Mode::Recv));
        assert_eq!(parse_args(&["--show"]), Some(Mode::Show));
        assert_eq!(parse_args(&["--exchange"]), Some(Mode::Exchange));
    }

    #[test]
    fn wrong_count_or_unknown_flag_is_rejected() {
        let none: [&str; 0] = [];
        assert_eq!(parse_args(&none), None);
        assert_eq!(parse_args(&["--send", "--recv"]), None);
        assert_eq!(parse_args(&["--copy"]), None);
        assert_eq!(parse_args(&["send"]), None);
        assert_eq!(parse_args(&["--SEND"]), None);
    }

    #[test]
    fn only_show_skips_the_clipboard() {
        assert!(!Mode::Show.uses_clipboard());
        assert!(Mode::Send.uses_clipboard());
        assert!(Mode::Recv.uses_clipboard());
        assert!(Mode::Exchange.uses_clipboard());
    }

    #[test]
    fn usage_lists_every_flag() {
        assert_eq!(usage("clipyank"), "Usage: clipyank --send|--recv|--show|--exchange");
    }
}
