//! Optional `dungeon.toml` configuration for the command-line front end.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File consulted when `--config` is not given. Missing is fine.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "dungeon.toml";

/// Settings that shape the front end, never the dungeon rules.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Directory scanned for `.txt` map files.
    pub(crate) maps_dir: PathBuf,
    /// Upper bound on turns played by `--auto`.
    pub(crate) max_turns: u32,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub(crate) log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from("assets/maps"),
            max_turns: 256,
            log_filter: String::from("warn"),
        }
    }
}

impl Config {
    /// Loads the explicit path, or the default path when it exists.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if !required && error.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read config at {}", path.display()));
            }
        };

        Self::parse(&contents).with_context(|| format!("invalid config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(Config::parse("").expect("parses"), Config::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::parse(
            r#"
            maps_dir = "levels"
            max_turns = 12
            "#,
        )
        .expect("parses");

        assert_eq!(config.maps_dir, PathBuf::from("levels"));
        assert_eq!(config.max_turns, 12);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("max_turn = 3").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = Path::new("definitely/not/here/dungeon.toml");
        assert!(Config::load(Some(missing)).is_err());
    }
}
