use std::time::{SystemTime, UNIX_EPOCH};

use notesearch_core::config::{self, Config, ConfigError};

fn unique_path(name: &str) -> std::path::PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join("notesearch")
        .join(format!("{unique}-{name}"))
}

#[test]
fn accepts_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.max_history_entries, 5);
    assert_eq!(cfg.history_key, "search-history");
    assert_eq!(cfg.snippet_max_chars, 100);
    assert_eq!(cfg.snippet_left_context, 10);
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn rejects_out_of_range_values() {
    let cfg = Config {
        max_history_entries: 0,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());

    let cfg = Config {
        max_history_entries: 50,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_ok());
    let cfg = Config {
        max_history_entries: 51,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());

    let cfg = Config {
        snippet_left_context: 100,
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());

    let cfg = Config {
        history_key: "  ".into(),
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn missing_file_yields_defaults_at_requested_path() {
    let path = unique_path("absent.toml");
    let cfg = config::load(Some(&path)).unwrap();

    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.max_history_entries, 5);
}

#[test]
fn save_then_load_round_trips_toml() {
    let path = unique_path("config.toml");
    let cfg = Config {
        max_history_entries: 9,
        snippet_max_chars: 80,
        config_path: path.clone(),
        ..Default::default()
    };

    config::save(&cfg).unwrap();
    let loaded = config::load(Some(&path)).unwrap();

    assert_eq!(loaded, cfg);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn loads_partial_json5_config() {
    let path = unique_path("config.json5");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "{\n  // shorter snippets for narrow overlays\n  snippet_max_chars: 60,\n  history_key: 'recent',\n}",
    )
    .unwrap();

    let cfg = config::load(Some(&path)).unwrap();
    assert_eq!(cfg.snippet_max_chars, 60);
    assert_eq!(cfg.history_key, "recent");
    assert_eq!(cfg.max_history_entries, 5);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn invalid_values_in_file_are_rejected() {
    let path = unique_path("bad.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "max_history_entries = 500\n").unwrap();

    let result = config::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    std::fs::remove_file(&path).unwrap();
}
