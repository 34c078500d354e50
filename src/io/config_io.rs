use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::{Config, DEFAULT_DATA_FILE, DEFAULT_SELECT_CMD};

/// Error type for config I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot create directory {path}: {source}")]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not serialize config.toml: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Get the config directory, respecting XDG_CONFIG_HOME
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".config"));
    base.join("gli")
}

/// Get the user's home directory
fn home_dir() -> PathBuf {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Load `config.toml` from `dir`, writing a default one first if it's missing.
///
/// The returned `data_file` has `~/` and environment variables expanded.
pub fn load_or_init(dir: &Path) -> Result<Config, ConfigError> {
    fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDirError {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let path = dir.join("config.toml");

    if !path.exists() {
        let config = default_config(dir);
        write_config(&path, &config)?;
        tracing::debug!(path = %path.display(), "wrote default config");
        return Ok(config);
    }

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let mut config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    config.data_file = expand_path(&config.data_file);
    tracing::debug!(path = %path.display(), data_file = %config.data_file, "loaded config");
    Ok(config)
}

fn default_config(dir: &Path) -> Config {
    Config {
        data_file: dir.join(DEFAULT_DATA_FILE).to_string_lossy().into_owned(),
        select_cmd: DEFAULT_SELECT_CMD.to_string(),
    }
}

fn write_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let text = toml::to_string(config)?;
    fs::write(path, text).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Expand a leading `~` to the home directory, then `$VAR` / `${VAR}`.
/// Unset variables expand to nothing.
pub fn expand_path(s: &str) -> String {
    expand_with(
        s,
        || Some(home_dir().to_string_lossy().into_owned()),
        |name| std::env::var(name).ok(),
    )
}

fn expand_with(
    s: &str,
    home: impl FnOnce() -> Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    shellexpand::full_with_context_no_errors(s, home, |name| {
        Some(lookup(name).unwrap_or_default())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "DATA" => Some("/srv/data".into()),
            "USER_1" => Some("ana".into()),
            _ => None,
        }
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("gli");

        let config = load_or_init(&dir).unwrap();
        assert_eq!(config.select_cmd, "fzf");
        assert_eq!(
            PathBuf::from(&config.data_file),
            dir.join(DEFAULT_DATA_FILE)
        );

        let text = fs::read_to_string(dir.join("config.toml")).unwrap();
        assert!(text.contains("data_filepath = "));
        assert!(text.contains("select_cmd = \"fzf\""));
    }

    #[test]
    fn test_second_load_reads_written_file() {
        let tmp = TempDir::new().unwrap();
        let first = load_or_init(tmp.path()).unwrap();
        let second = load_or_init(tmp.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_existing_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "data_filepath = \"/tmp/tasks.gli\"\nselect_cmd = \"peco\"\n",
        )
        .unwrap();
        let config = load_or_init(tmp.path()).unwrap();
        assert_eq!(config.data_file, "/tmp/tasks.gli");
        assert_eq!(config.select_cmd, "peco");
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "select_cmd = \n").unwrap();
        let err = load_or_init(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_missing_key_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "select_cmd = \"fzf\"\n").unwrap();
        assert!(matches!(
            load_or_init(tmp.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_expand_env_forms() {
        let expand = |s| expand_with(s, || Some("/home/ana".into()), lookup);
        assert_eq!(expand("$DATA/x.gli"), "/srv/data/x.gli");
        assert_eq!(expand("${DATA}x.gli"), "/srv/datax.gli");
        assert_eq!(expand("/home/$USER_1/t"), "/home/ana/t");
        assert_eq!(expand("/a/$NOPE/b"), "/a//b");
        assert_eq!(expand("plain/path"), "plain/path");
    }

    #[test]
    fn test_expand_tilde_then_env() {
        let expand = |s| expand_with(s, || Some("/home/ana".into()), lookup);
        assert_eq!(expand("~/tasks.gli"), "/home/ana/tasks.gli");
        assert_eq!(expand("~/$USER_1/${DATA}"), "/home/ana/ana//srv/data");
        assert_eq!(expand("~tasks"), "~tasks");
    }

    #[test]
    fn test_expand_path_uses_process_env() {
        let expanded = expand_path("~/tasks.gli");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("tasks.gli"));
    }
}
