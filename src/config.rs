use crate::runtime::interpreter::{RunOptions, DEFAULT_MAX_CALL_DEPTH};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const CONFIG_FILE: &str = "vader.toml";

/// Optional project settings read from `vader.toml`. Every key has a
/// default, so a missing file and an empty file are equivalent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VaderConfig {
    pub run: RunSection,
    pub build: BuildSection,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSection {
    pub debug: bool,
    pub max_call_depth: usize,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            debug: false,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl RunSection {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            max_call_depth: self.max_call_depth,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    pub platform: Option<String>,
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("invalid {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl VaderConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|err| err.to_string())
    }

    /// Looks for `vader.toml` beside the program, then in the working
    /// directory. No file means defaults.
    pub fn discover(program: &Path) -> Result<Self, ConfigError> {
        match find_config(program) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

fn find_config(program: &Path) -> Option<PathBuf> {
    let beside = program
        .parent()
        .map(|dir| dir.join(CONFIG_FILE))
        .filter(|path| path.is_file());
    beside.or_else(|| {
        let cwd = std::env::current_dir().ok()?.join(CONFIG_FILE);
        cwd.is_file().then_some(cwd)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = VaderConfig::parse("").expect("config");
        assert_eq!(config, VaderConfig::default());
        assert_eq!(config.run.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }

    #[test]
    fn reads_sections() {
        let config = VaderConfig::parse(
            "[run]\ndebug = true\nmax_call_depth = 32\n\n[build]\nplatform = \"flutter\"\nout_dir = \"dist\"\n",
        )
        .expect("config");
        assert!(config.run.debug);
        assert_eq!(config.run.options().max_call_depth, 32);
        assert_eq!(config.build.platform.as_deref(), Some("flutter"));
        assert_eq!(config.build.out_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = VaderConfig::parse("[run]\nspeed = 3\n").unwrap_err();
        assert!(err.contains("speed"));
    }

    #[test]
    fn discovers_file_next_to_program() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "[build]\nplatform = \"iot\"\n").expect("write");
        let program = dir.path().join("app.vdr");
        let config = VaderConfig::discover(&program).expect("config");
        assert_eq!(config.build.platform.as_deref(), Some("iot"));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[run\n").expect("write");
        let err = VaderConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }
}
