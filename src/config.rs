// config.rs

use std::env;
use std::path::PathBuf;

pub const HISTORY_FILE_NAME: &str = ".clipyank_history";
pub const HISTORY_ENV: &str = "CLIPYANK_HISTORY";
pub const LOG_ENV: &str = "CLIPYANK_LOG";

/// History location, looked up once in `main`. The session type is only
/// read for modes that run a clipboard command (see `Session::from_env`).
#[derive(Clone, Debug)]
pub struct Config {
    /// `None` when no home directory is known and no override is set.
    pub history_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::resolve(env::var_os(HISTORY_ENV).map(PathBuf::from), dirs::home_dir())
    }

    fn resolve(history_override: Option<PathBuf>, home: Option<PathBuf>) -> Self {
        let history_path = history_override
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| home.map(|h| h.join(HISTORY_FILE_NAME)));
        Self { history_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_defaults_to_home() {
        let config = Config::resolve(None, Some(PathBuf::from("/home/ada")));
        assert_eq!(
            config.history_path,
            Some(PathBuf::from("/home/ada/.clipyank_history"))
        );
    }

    #[test]
    fn override_wins_over_home() {
        let config = Config::resolve(
            Some(PathBuf::from("/tmp/hist")),
            Some(PathBuf::from("/home/ada")),
        );
        assert_eq!(config.history_path, Some(PathBuf::from("/tmp/hist")));
    }

    #[test]
    fn empty_override_is_ignored() {
        let config = Config::resolve(Some(PathBuf::new()), Some(PathBuf::from("/root")));
        assert_eq!(config.history_path, Some(PathBuf::from("/root/.clipyank_history")));
    }

    #[test]
    fn no_home_disables_history() {
        let config = Config::resolve(None, None);
        assert_eq!(config.history_path, None);
    }
}
