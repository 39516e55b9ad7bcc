use std::collections::HashMap;
use std::fs;

use cinesphere_config::{
    API_KEY_ENV, CONFIG_JSON_ENV, CONFIG_PATH_ENV, ConfigGuardRailError,
    ConfigLoadError, ConfigLoader, ConfigSource, GalaxyConfig,
};
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

fn loader() -> ConfigLoader {
    ConfigLoader::new().with_dotenv(false)
}

#[test]
fn toml_file_overrides_only_what_it_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("galaxy.toml");
    fs::write(
        &path,
        r#"
[camera]
smoothing = 0.06
default_distance = 40.0

[catalog]
poster_size = "w342"
language = "de-DE"
"#,
    )
    .unwrap();

    let load = loader().with_path(&path).load_with(env(&[])).unwrap();
    assert_eq!(load.source, ConfigSource::Explicit(path));
    assert_eq!(load.config.camera.smoothing, 0.06);
    assert_eq!(load.config.camera.default_distance, 40.0);
    assert_eq!(load.config.camera.focus_scale, 1.35);
    assert_eq!(load.config.catalog.language.as_deref(), Some("de-DE"));
    assert_eq!(load.config.catalog.poster_size.as_str(), "w342");
    assert_eq!(load.config.layout.scale, 2.8);
    assert_eq!(load.config.session.warp_hold_ms, 500);
}

#[test]
fn json_file_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("galaxy.json");
    fs::write(&path, r#"{ "layout": { "scale": 3.0, "base": 10.0 } }"#).unwrap();

    let config = GalaxyConfig::load_from_file(&path).unwrap();
    assert_eq!(config.layout.scale, 3.0);
    assert_eq!(config.layout.base, 10.0);
}

#[test]
fn extensionless_file_falls_back_from_toml_to_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("galaxyrc");
    fs::write(&path, r#"{ "session": { "warp_hold_ms": 250 } }"#).unwrap();

    let config = GalaxyConfig::load_from_file(&path).unwrap();
    assert_eq!(config.session.warp_hold_ms, 250);
}

#[test]
fn env_path_wins_over_inline_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("env.toml");
    fs::write(&path, "[session]\nwarp_hold_ms = 100\n").unwrap();
    let path_str = path.display().to_string();

    let load = loader()
        .load_with(env(&[
            (CONFIG_PATH_ENV, path_str.as_str()),
            (CONFIG_JSON_ENV, r#"{ "session": { "warp_hold_ms": 900 } }"#),
        ]))
        .unwrap();
    assert_eq!(load.source, ConfigSource::EnvPath(path));
    assert_eq!(load.config.session.warp_hold_ms, 100);
}

#[test]
fn inline_json_and_api_key_override() {
    let load = loader()
        .load_with(env(&[
            (CONFIG_JSON_ENV, r#"{ "catalog": { "api_key": "from-json" } }"#),
            (API_KEY_ENV, "  from-env  "),
        ]))
        .unwrap();
    assert_eq!(load.source, ConfigSource::EnvInline);
    assert_eq!(load.config.catalog.api_key, "from-env");
    assert!(load.api_key_from_env);
    assert!(load.warnings.is_empty());
}

#[test]
fn nothing_set_gives_defaults_with_key_warning() {
    let load = loader().load_with(env(&[])).unwrap();
    assert_eq!(load.source, ConfigSource::Default);
    assert_eq!(load.config, GalaxyConfig::default());
    assert!(!load.api_key_from_env);
    assert_eq!(load.warnings.len(), 1);
}

#[test]
fn guard_rails_run_on_loaded_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[camera]\nsmoothing = 0.0\n").unwrap();

    let err = loader().with_path(&path).load_with(env(&[])).unwrap_err();
    assert!(matches!(
        err,
        ConfigLoadError::GuardRail(ConfigGuardRailError::SmoothingOutOfRange { .. })
    ));
}

#[test]
fn missing_and_malformed_files_are_reported() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("absent.toml");
    let err = loader().with_path(&missing).load_with(env(&[])).unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingFile { .. }));

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[camera\nsmoothing = ").unwrap();
    let err = loader().with_path(&broken).load_with(env(&[])).unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse(_)));
}

#[test]
fn rendered_toml_reads_back() {
    let mut config = GalaxyConfig::default();
    config.camera.smoothing = 0.05;
    let rendered = config.to_toml().unwrap();
    let parsed = GalaxyConfig::parse_from_str(&rendered, "rendered").unwrap();
    assert_eq!(parsed, config);
}
