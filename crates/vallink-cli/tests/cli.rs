use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn vallink(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("vallink");
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("RUST_LOG")
        .args(["--db-path", home.join("vallink.sqlite3").to_str().expect("db path")]);
    cmd
}

fn run_cmd(home: &Path, args: &[&str]) -> String {
    let output = vallink(home).args(args).output().expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(home: &Path, args: &[&str]) -> Value {
    let output = vallink(home)
        .arg("--json")
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_create_list_show_link_flow() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();

    let created = run_cmd_json(
        home,
        &[
            "create",
            "--sender",
            "Sam",
            "--recipient",
            "Alex",
            "--phone",
            "+1 (234) 567-8901",
            "--template",
            "2",
            "--theme",
            "elegant",
        ],
    );
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(id.len(), 8);
    assert_eq!(created["proposal"]["senderName"], "Sam");
    assert_eq!(created["proposal"]["theme"], "elegant");
    assert_eq!(
        created["revealUrl"].as_str().expect("url"),
        format!("https://vallink.app/v/{id}")
    );

    let list = run_cmd_json(home, &["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id.as_str());
    assert_eq!(items[0]["recipientName"], "Alex");

    let shown = run_cmd_json(home, &["show", &format!("/v/{id}")]);
    assert_eq!(shown["whatsappNumber"], "+1 (234) 567-8901");

    let link = run_cmd(home, &["link", &id]);
    let mut lines = link.lines();
    assert_eq!(lines.next(), Some(format!("https://vallink.app/v/{id}").as_str()));
    let whatsapp = lines.next().expect("whatsapp line");
    assert!(whatsapp.starts_with("https://wa.me/12345678901?text="));
    assert!(whatsapp.contains("Sam"));
}

#[test]
fn cli_play_demo_with_scripted_answers() {
    let temp = TempDir::new().expect("temp dir");
    let report = run_cmd_json(
        temp.path(),
        &[
            "play",
            "https://vallink.app/v/demo",
            "--answer",
            "no",
            "--answer",
            "yes",
            "--time-unit-ms",
            "1",
        ],
    );
    assert_eq!(report["id"], "demo");
    assert_eq!(report["declines"], 1);
    assert_eq!(report["cajolingMessages"][0], "Are you sure? 🥺");
    let dodge = &report["declineOffset"];
    assert!(dodge["x"].as_f64().expect("x").abs() <= 100.0);
    assert!(dodge["y"].as_f64().expect("y").abs() <= 50.0);
    assert_eq!(report["finalStage"], "whatsapp");
    assert_eq!(
        report["stages"],
        serde_json::json!(["intro", "message", "question", "celebration", "whatsapp"])
    );
    assert!(report["whatsappLink"]
        .as_str()
        .expect("link")
        .starts_with("https://wa.me/1234567890?text="));

    assert!(!temp.path().join("vallink.sqlite3").exists());

    let shown = run_cmd_json(temp.path(), &["show", "/v/demo"]);
    assert_eq!(shown["senderName"], "Your Secret Admirer");
    assert!(!temp.path().join("vallink.sqlite3").exists());

    let listed = run_cmd_json(temp.path(), &["list"]);
    assert_eq!(listed.as_array().expect("array").len(), 0);
}

#[test]
fn cli_play_text_output_without_answers_stops_at_question() {
    let temp = TempDir::new().expect("temp dir");
    let output = vallink(temp.path())
        .args(["play", "demo", "--time-unit-ms", "1"])
        .write_stdin("")
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Beautiful Soul"));
    assert!(stdout.contains("Will You Be My Valentine?"));
    assert!(!stdout.contains("YES!!!"));
}

#[test]
fn cli_unknown_proposal_exits_not_found() {
    let temp = TempDir::new().expect("temp dir");
    for command in ["play", "show", "link"] {
        let output = vallink(temp.path())
            .args([command, "nothere1"])
            .output()
            .expect("run command");
        assert_eq!(output.status.code(), Some(2), "{command}: {:?}", output);
        let stderr = String::from_utf8(output.stderr).expect("utf8");
        assert!(stderr.contains("Valentine not found"));
    }
}

#[test]
fn cli_invalid_input_exits_with_code_three() {
    let temp = TempDir::new().expect("temp dir");
    let output = vallink(temp.path())
        .args(["create", "--sender", "Sam", "--phone", "123"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Please enter a valid phone number (10-15 digits)"));

    let output = vallink(temp.path())
        .args(["create", "--sender", "Sam", "--phone", "12345678901", "--template", "9"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));

    let listed = run_cmd_json(temp.path(), &["list"]);
    assert_eq!(listed.as_array().expect("array").len(), 0);
}

#[test]
fn cli_wizard_reads_answers_from_stdin() {
    let temp = TempDir::new().expect("temp dir");
    let output = vallink(temp.path())
        .args(["--json", "wizard"])
        .write_stdin("Kim\nJo\n98765432109\nSee you at sunset\nclassic\nyes\n")
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let created: Value = serde_json::from_slice(&output.stdout).expect("stdout is only json");
    assert_eq!(created["proposal"]["message"], "See you at sunset");
    assert_eq!(created["proposal"]["theme"], "classic");
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Step 1 of 4: Your Details"));

    let list = run_cmd_json(temp.path(), &["list"]);
    assert_eq!(list.as_array().expect("array").len(), 1);
}

#[test]
fn cli_wizard_text_mode_prompts_on_stdout() {
    let temp = TempDir::new().expect("temp dir");
    let output = vallink(temp.path())
        .arg("wizard")
        .write_stdin("Kim\n\n98765432109\n\n\nyes\n")
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Step 4 of 4: Preview & Share"));
    assert!(stdout.contains("created "));
}

#[test]
fn cli_config_sets_base_url_and_theme() {
    let temp = TempDir::new().expect("temp dir");
    let config_dir = temp.path().join("config").join("vallink");
    std::fs::create_dir_all(&config_dir).expect("config dir");
    let config_path = config_dir.join("config.toml");
    std::fs::write(
        &config_path,
        "base_url = \"https://love.example/app/\"\ndefault_theme = \"playful\"\n",
    )
    .expect("write config");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&config_path, std::fs::Permissions::from_mode(0o600))
            .expect("chmod");
    }

    let created = run_cmd_json(
        temp.path(),
        &["create", "--sender", "Sam", "--phone", "12345678901"],
    );
    let id = created["id"].as_str().expect("id");
    assert_eq!(created["proposal"]["theme"], "playful");
    assert_eq!(
        created["revealUrl"].as_str().expect("url"),
        format!("https://love.example/app/v/{id}")
    );
}

#[test]
fn cli_catalog_commands() {
    let temp = TempDir::new().expect("temp dir");
    let templates = run_cmd_json(temp.path(), &["templates"]);
    let templates = templates.as_array().expect("array");
    assert_eq!(templates.len(), 5);
    assert_eq!(templates[0]["position"], 1);

    let themes = run_cmd(temp.path(), &["themes"]);
    assert!(themes.contains("Romantic Rose"));
    assert!(themes.contains("Classic Red"));
}
