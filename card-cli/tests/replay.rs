//! Replay command integration tests.

use std::io::Write;

use card_cli::{run, CliArgs};
use clap::Parser;

fn script_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write script");
    file
}

fn replay(script: &tempfile::NamedTempFile) -> anyhow::Result<serde_json::Value> {
    let path = script.path().to_str().expect("utf-8 path");
    let args = CliArgs::try_parse_from(["card-studio", "replay", path])?;
    Ok(serde_json::from_str(&run(args)?)?)
}

#[test]
fn test_replay_reports_state_and_history() {
    let script = script_file(
        r#"[
            {"op": "apply_template", "template_id": "blank"},
            {"op": "add", "kind": "box", "overrides": {"size": {"width": 10, "height": 10}}},
            {"op": "commit"},
            {"op": "add", "kind": "circle"},
            {"op": "commit"},
            {"op": "undo"}
        ]"#,
    );
    let output = replay(&script).expect("replay succeeds");

    assert_eq!(output["history"]["len"], 2);
    assert_eq!(output["history"]["index"], 0);
    let elements = output["state"]["elements"].as_array().expect("elements");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0]["body"]["type"], "box");
}

#[test]
fn test_replay_stops_on_bad_template() {
    let script = script_file(r#"[{"op": "apply_template", "template_id": "missing"}]"#);
    let err = replay(&script).expect_err("unknown template");
    assert!(format!("{err:#}").contains("Operation 1 of 1 failed"));
}

#[test]
fn test_replay_rejects_malformed_script() {
    let script = script_file(r#"{"op": "commit"}"#);
    assert!(replay(&script).is_err());
}

#[test]
fn test_replay_with_config_file() {
    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    write!(config, r#"{{"default_template": "flashcard"}}"#).expect("write config");
    let script = script_file("[]");

    let args = CliArgs::try_parse_from([
        "card-studio",
        "--config",
        config.path().to_str().expect("utf-8 path"),
        "replay",
        script.path().to_str().expect("utf-8 path"),
    ])
    .expect("args");
    let output: serde_json::Value = serde_json::from_str(&run(args).expect("runs")).expect("json");
    assert_eq!(output["state"]["width"], 600);
    assert_eq!(output["history"]["index"], -1);
}
