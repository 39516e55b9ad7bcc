use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use tempfile::TempDir;

fn config_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("cinesphere.toml");
    fs::write(&path, "[catalog]\napi_key = \"test-key\"\n").unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("cinespherectl");
    let output = cmd.arg("--help").assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&output);
    for sub in ["layout", "fly", "browse", "trailer", "genres", "config"] {
        assert!(text.contains(sub), "help missing '{sub}'");
    }
    assert!(text.contains("--config"), "help missing global --config");
}

#[test]
fn browse_help_documents_filters() {
    let mut cmd = cargo_bin_cmd!("cinespherectl");
    let out = cmd
        .arg("browse")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("--search"), "browse help missing --search");
    assert!(text.contains("--genre"), "browse help missing --genre");
    assert!(text.contains("--pages"), "browse help missing --pages");
}

#[test]
fn genres_lists_ids() {
    let mut cmd = cargo_bin_cmd!("cinespherectl");
    let out = cmd.arg("genres").assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("878"), "genres missing science fiction id");
    assert!(text.contains("Action"), "genres missing Action");
}

#[test]
fn layout_json_has_one_position_per_poster() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);

    let mut cmd = cargo_bin_cmd!("cinespherectl");
    let out = cmd
        .arg("--config")
        .arg(&config)
        .args(["layout", "--count", "12", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["count"], 12);
    assert_eq!(report["positions"].as_array().map(Vec::len), Some(12));
    let radius = report["radius"].as_f64().unwrap();
    assert!((radius - (12f64.sqrt() * 2.8 + 8.0)).abs() < 1e-3);
}

#[test]
fn fly_reports_arrival() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);

    let mut cmd = cargo_bin_cmd!("cinespherectl");
    let out = cmd
        .arg("--config")
        .arg(&config)
        .args(["fly", "--x", "-4", "--y", "2", "--z", "10"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("arrived after"), "unexpected output: {text}");
}

#[test]
fn config_check_rejects_bad_smoothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[camera]\nsmoothing = 2.0\n").unwrap();

    let mut cmd = cargo_bin_cmd!("cinespherectl");
    cmd.arg("--config")
        .arg(&path)
        .args(["config", "check"])
        .assert()
        .failure();
}

#[test]
fn absurd_frame_rate_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);

    for args in [
        vec!["fly", "--x", "1", "--y", "1", "--z", "1", "--fps", "1e10"],
        vec!["browse", "--fps", "1e10"],
    ] {
        let mut cmd = cargo_bin_cmd!("cinespherectl");
        let out = cmd
            .arg("--config")
            .arg(&config)
            .args(&args)
            .assert()
            .failure()
            .get_output()
            .stderr
            .clone();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("--fps"), "unexpected stderr: {text}");
    }
}
