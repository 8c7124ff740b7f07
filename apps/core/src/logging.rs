use std::fmt::{Display, Write as _};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

const LOG_FILE_NAME: &str = "notesearch.log";
const MAX_LOG_BYTES: u64 = 512 * 1024;
const KEPT_ROLLOVERS: usize = 3;

static LOGGER: OnceLock<Mutex<File>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
        }
    }
}

/// A named field attached to an event, e.g. `("seq", &ticket.seq)`.
pub type Field<'a> = (&'a str, &'a dyn Display);

pub fn logs_dir() -> PathBuf {
    crate::config::stable_app_data_dir().join("logs")
}

/// Opens `notesearch.log` under `log_dir`, rolling the previous file over to
/// `notesearch.log.1` once it is too large. Events are dropped until this runs.
pub fn init(log_dir: &Path) -> Result<(), std::io::Error> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    if fs::metadata(&log_path).is_ok_and(|meta| meta.len() >= MAX_LOG_BYTES) {
        roll_over(log_dir)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let _ = LOGGER.set(Mutex::new(file));
    Ok(())
}

pub fn info(name: &str, fields: &[Field<'_>]) {
    event(Level::Info, name, fields);
}

pub fn warn(name: &str, fields: &[Field<'_>]) {
    event(Level::Warn, name, fields);
}

/// Writes one `[ts] [LEVEL] name key=value ...` line.
pub fn event(level: Level, name: &str, fields: &[Field<'_>]) {
    let Some(file) = LOGGER.get() else {
        return;
    };
    let Ok(mut file) = file.lock() else {
        return;
    };

    let line = format_event(now_secs(), level, name, fields);
    let _ = file.write_all(line.as_bytes());
    let _ = file.flush();
}

fn format_event(ts: u64, level: Level, name: &str, fields: &[Field<'_>]) -> String {
    let mut line = format!("[{ts}] [{}] {name}", level.as_str());
    for (key, value) in fields {
        let _ = write!(line, " {key}={}", field_value(&value.to_string()));
    }
    line.push('\n');
    line
}

// Values are quoted when they would otherwise split into more than one token.
fn field_value(raw: &str) -> String {
    let single_line = raw.replace(['\n', '\r'], " ");
    let needs_quotes = single_line.is_empty()
        || single_line
            .chars()
            .any(|c| c.is_whitespace() || c == '=' || c == '"');
    if needs_quotes {
        format!("\"{}\"", single_line.replace('"', "\\\""))
    } else {
        single_line
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn rollover_path(log_dir: &Path, n: usize) -> PathBuf {
    log_dir.join(format!("{LOG_FILE_NAME}.{n}"))
}

fn roll_over(log_dir: &Path) -> Result<(), std::io::Error> {
    let oldest = rollover_path(log_dir, KEPT_ROLLOVERS);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for n in (1..KEPT_ROLLOVERS).rev() {
        let from = rollover_path(log_dir, n);
        if from.exists() {
            fs::rename(&from, rollover_path(log_dir, n + 1))?;
        }
    }
    fs::rename(log_dir.join(LOG_FILE_NAME), rollover_path(log_dir, 1))
}
