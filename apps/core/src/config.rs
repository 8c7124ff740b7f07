use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::history::{DEFAULT_HISTORY_KEY, MAX_HISTORY_ENTRIES};
use crate::snippet::SnippetOptions;

const APP_DIR_NAME: &str = "notesearch";
const CONFIG_FILE_NAME: &str = "config.toml";
const HISTORY_DB_FILE_NAME: &str = "history.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Encode(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Encode(error) => write!(f, "encode error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub history_key: String,
    /// Recent-search cap. Defaults to `MAX_HISTORY_ENTRIES` (5), the overlay's
    /// fixed limit; `validate` accepts 1 through 50 for users who want more.
    pub max_history_entries: usize,
    pub snippet_max_chars: usize,
    pub snippet_left_context: usize,
    pub history_db_path: PathBuf,
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            max_history_entries: MAX_HISTORY_ENTRIES,
            snippet_max_chars: SnippetOptions::default().max_chars,
            snippet_left_context: SnippetOptions::default().left_context,
            history_db_path: base.join(HISTORY_DB_FILE_NAME),
            config_path: base.join(CONFIG_FILE_NAME),
        }
    }
}

impl Config {
    pub fn snippet_options(&self) -> SnippetOptions {
        SnippetOptions {
            max_chars: self.snippet_max_chars,
            left_context: self.snippet_left_context,
        }
    }
}

// On-disk shape: every field optional so partial files fall back to defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    history_key: Option<String>,
    max_history_entries: Option<usize>,
    snippet_max_chars: Option<usize>,
    snippet_left_context: Option<usize>,
    history_db_path: Option<PathBuf>,
}

pub fn stable_app_data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("NOTESEARCH_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    if let Some(data) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(data).join(APP_DIR_NAME);
    }
    if let Some(appdata) = std::env::var_os("APPDATA").filter(|v| !v.is_empty()) {
        return PathBuf::from(appdata).join(APP_DIR_NAME);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR_NAME);
    }
    std::env::temp_dir().join(APP_DIR_NAME)
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    if cfg.history_key.trim().is_empty() {
        return Err("history_key is required".into());
    }

    if cfg.max_history_entries < 1 || cfg.max_history_entries > 50 {
        return Err("max_history_entries out of range".into());
    }

    if cfg.snippet_max_chars < 20 || cfg.snippet_max_chars > 1000 {
        return Err("snippet_max_chars out of range".into());
    }

    if cfg.snippet_left_context >= cfg.snippet_max_chars {
        return Err("snippet_left_context must be smaller than snippet_max_chars".into());
    }

    if cfg.history_db_path.as_os_str().is_empty() {
        return Err("history_db_path is required".into());
    }

    if cfg.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    Ok(())
}

/// Loads the config at `path` (or the default location). A missing file
/// yields defaults; `.json`/`.json5` files are read as JSON5, anything else as TOML.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();
    if let Some(path) = path {
        cfg.config_path = path.to_path_buf();
    }

    let raw = match std::fs::read_to_string(&cfg.config_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(cfg),
        Err(error) => return Err(ConfigError::Io(error)),
    };

    let file = parse_config_file(&cfg.config_path, &raw)?;
    apply_file(&mut cfg, file);
    validate(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg).map_err(ConfigError::Invalid)?;
    if let Some(parent) = cfg.config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = ConfigFile {
        history_key: Some(cfg.history_key.clone()),
        max_history_entries: Some(cfg.max_history_entries),
        snippet_max_chars: Some(cfg.snippet_max_chars),
        snippet_left_context: Some(cfg.snippet_left_context),
        history_db_path: Some(cfg.history_db_path.clone()),
    };
    let encoded =
        toml::to_string_pretty(&file).map_err(|e| ConfigError::Encode(e.to_string()))?;
    std::fs::write(&cfg.config_path, encoded)?;
    Ok(())
}

fn parse_config_file(path: &Path, raw: &str) -> Result<ConfigFile, ConfigError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);

    if is_json {
        json5::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    } else {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn apply_file(cfg: &mut Config, file: ConfigFile) {
    if let Some(key) = file.history_key {
        cfg.history_key = key;
    }
    if let Some(max) = file.max_history_entries {
        cfg.max_history_entries = max;
    }
    if let Some(max_chars) = file.snippet_max_chars {
        cfg.snippet_max_chars = max_chars;
    }
    if let Some(left) = file.snippet_left_context {
        cfg.snippet_left_context = left;
    }
    if let Some(db_path) = file.history_db_path {
        cfg.history_db_path = db_path;
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_config_file, ConfigError};
    use std::path::Path;

    #[test]
    fn json5_config_accepts_comments() {
        let raw = "{\n  // keep a longer trail\n  max_history_entries: 8,\n}";
        let file = parse_config_file(Path::new("cfg.json5"), raw).unwrap();
        assert_eq!(file.max_history_entries, Some(8));
    }

    #[test]
    fn toml_parse_error_is_typed() {
        let result = parse_config_file(Path::new("cfg.toml"), "max_history_entries = [");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
