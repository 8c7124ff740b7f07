use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::{self, Config, ConfigError};
use crate::contract::{SearchResults, SearchTicket};
use crate::controller::{Key, SearchController};
use crate::history::HistoryStore;
use crate::kv_store::{KeyValueStore, SqliteStore, StoreError};
use crate::logging;
use crate::model::{Candidate, CandidateId};
use crate::navigation::{HostEvent, OverlayHost, RecordingHost};
use crate::snippet::highlighted_snippet_with;

const USAGE: &str =
    "usage: notesearch-core [--config PATH] <history | clear-history | snippet TEXT | replay SCRIPT>";

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Store(StoreError),
    Script(String),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Store(error) => write!(f, "store error: {error}"),
            Self::Script(error) => write!(f, "replay script error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for RuntimeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    History,
    ClearHistory,
    Snippet(String),
    Replay(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions, String> {
    let mut config_path = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("--config requires a path\n{USAGE}"))?;
                config_path = Some(PathBuf::from(value));
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => {
                return Err(format!("unknown flag '{other}'\n{USAGE}"));
            }
            other => positional.push(other),
        }
    }

    let command = match positional.as_slice() {
        ["history"] => Command::History,
        ["clear-history"] => Command::ClearHistory,
        ["snippet", text] => Command::Snippet((*text).to_string()),
        ["replay", script] => Command::Replay(PathBuf::from(script)),
        [] => return Err(format!("missing command\n{USAGE}")),
        _ => return Err(format!("unrecognized arguments: {}\n{USAGE}", positional.join(" "))),
    };

    Ok(CliOptions {
        config_path,
        command,
    })
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config_path.as_deref())?;
    if let Err(error) = logging::init(&logging::logs_dir()) {
        eprintln!("[notesearch-core] logging disabled: {error}");
    }
    logging::info(
        "startup",
        &[
            ("config_path", &config.config_path.display()),
            ("history_db_path", &config.history_db_path.display()),
        ],
    );

    match options.command {
        Command::History => {
            let history = open_history(&config)?;
            let entries = history.load();
            if entries.is_empty() {
                println!("(no recent searches)");
            }
            for entry in &entries {
                println!("{}", describe(entry));
            }
        }
        Command::ClearHistory => {
            let mut history = open_history(&config)?;
            history.clear();
            println!("[notesearch-core] search history cleared");
        }
        Command::Snippet(text) => {
            println!("{}", highlighted_snippet_with(&text, config.snippet_options()));
        }
        Command::Replay(path) => {
            let script = load_script(&path)?;
            let history = open_history(&config)?;
            let mut controller = SearchController::new(history, RecordingHost::default())
                .with_snippet_options(config.snippet_options());
            for line in replay(&mut controller, &script) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn open_history(config: &Config) -> Result<HistoryStore<SqliteStore>, RuntimeError> {
    let store = SqliteStore::open_from_config(config)?;
    Ok(HistoryStore::from_config(store, config))
}

/// A recorded overlay session, read from a JSON5 file.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub events: Vec<ReplayEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayEvent {
    Input(String),
    Response {
        query: String,
        #[serde(default)]
        notes: Vec<Candidate>,
        #[serde(default)]
        tags: Vec<Candidate>,
    },
    Fail {
        query: String,
        message: String,
    },
    Key(String),
    Select(Candidate),
    Dismiss,
}

pub fn parse_script(raw: &str) -> Result<ReplayScript, RuntimeError> {
    json5::from_str(raw).map_err(|e| RuntimeError::Script(e.to_string()))
}

fn load_script(path: &Path) -> Result<ReplayScript, RuntimeError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RuntimeError::Script(format!("failed to read {}: {e}", path.display())))?;
    parse_script(&raw)
}

/// Drives `controller` through `script`, returning one trace line per event
/// followed by the final rows and host events.
pub fn replay<S: KeyValueStore>(
    controller: &mut SearchController<S, RecordingHost>,
    script: &ReplayScript,
) -> Vec<String> {
    let mut trace = Vec::new();
    let mut pending: HashMap<String, SearchTicket> = HashMap::new();

    for event in &script.events {
        match event {
            ReplayEvent::Input(text) => match controller.on_input(text) {
                Some(ticket) => {
                    trace.push(format!("input '{text}' issued seq={}", ticket.seq));
                    pending.insert(ticket.query.clone(), ticket);
                }
                None => trace.push(format!("input '{text}' {}", selection_label(controller))),
            },
            ReplayEvent::Response { query, notes, tags } => {
                let Some(ticket) = pending.remove(query.trim()) else {
                    trace.push(format!("response '{query}' ignored: no request in flight"));
                    continue;
                };
                let results = match SearchResults::try_from_lists(notes.clone(), tags.clone()) {
                    Ok(results) => results,
                    Err(error) => {
                        logging::warn(
                            "search.response_rejected",
                            &[("query", query), ("error", &error)],
                        );
                        trace.push(format!("response '{query}' rejected: {error}"));
                        continue;
                    }
                };
                let applied = controller.on_response(&ticket, results);
                let outcome = if applied { "applied" } else { "stale" };
                trace.push(format!(
                    "response '{query}' {outcome} {}",
                    selection_label(controller)
                ));
            }
            ReplayEvent::Fail { query, message } => {
                pending.remove(query.trim());
                logging::warn("search.failed", &[("query", query), ("error", message)]);
                trace.push(format!("response '{query}' failed: {message}"));
            }
            ReplayEvent::Key(name) => {
                controller.on_key(&Key::from_name(name));
                trace.push(format!("key {name} {}", selection_label(controller)));
            }
            ReplayEvent::Select(item) => {
                controller.on_select_item(item);
                trace.push(format!("select {}", describe(item)));
            }
            ReplayEvent::Dismiss => {
                controller.dismiss();
                trace.push("dismiss".to_string());
            }
        }
    }

    for section in controller.rows() {
        trace.push(format!("[{}]", section.title));
        for row in section.rows {
            let marker = if row.selected { ">" } else { " " };
            trace.push(format!("{marker} {} | {}", row.title, row.subtitle));
        }
    }
    for event in &controller.host().events {
        match event {
            HostEvent::Navigate(route) => trace.push(format!("navigate {route}")),
            HostEvent::Close => trace.push("close".to_string()),
        }
    }
    trace
}

fn selection_label<S: KeyValueStore, H: OverlayHost>(
    controller: &SearchController<S, H>,
) -> String {
    match controller.selected() {
        Some(candidate) => format!("selected={}", id_label(candidate.id())),
        None => "selected=none".to_string(),
    }
}

fn id_label(id: CandidateId) -> String {
    match id {
        CandidateId::Note(id) => format!("note:{id}"),
        CandidateId::Tag(id) => format!("tag:{id}"),
    }
}

fn describe(candidate: &Candidate) -> String {
    format!("{} {}", id_label(candidate.id()), candidate.title())
}
