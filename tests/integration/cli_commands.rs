use publish_gate::alert::Done;
use publish_gate::config::CONFIG_FILE_NAME;
use publish_gate::error::PublishError;
use publish_gate::filter::FutureSet;
use publish_gate::tooling::cli::{CliContext, Commands};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("posts")).unwrap();
    fs::write(src.join("index.md"), "# Home\n").unwrap();
    fs::write(
        src.join("posts").join("draft.md"),
        "---\ntitle: WIP\npublish: draft\n---\nSoon\n",
    )
    .unwrap();
    fs::write(
        src.join("posts").join("secret.md"),
        "---\npublish: private\n---\n",
    )
    .unwrap();
    fs::write(
        src.join("posts").join("launch.md"),
        "---\npublish: 2999-01-01\n---\n",
    )
    .unwrap();
    fs::write(
        src.join("posts").join("old.md"),
        "---\npublish: 2001-01-01\n---\n",
    )
    .unwrap();
    temp
}

fn filter_command(format: &str) -> Commands {
    Commands::Filter {
        draft: false,
        private: false,
        future: false,
        format: format.to_string(),
    }
}

#[test]
fn filter_json_lists_retained_and_removed() {
    let temp = site();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&filter_command("json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["total"], 5);
    assert_eq!(
        value["retained"],
        serde_json::json!(["index.md", "posts/old.md"])
    );
    assert_eq!(value["removed"]["draft"], serde_json::json!(["posts/draft.md"]));
    assert_eq!(value["removed"]["private"], serde_json::json!(["posts/secret.md"]));
    assert_eq!(value["deferred"][0]["id"], "posts/launch.md");
    assert_eq!(value["next_release"], "2999-01-01T00:00:00+00:00");
}

#[test]
fn filter_flags_override_config() {
    let temp = site();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Filter {
            draft: true,
            private: true,
            future: true,
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["retained"].as_array().unwrap().len(), 5);
    assert!(value["next_release"].is_null());
}

#[test]
fn filter_text_output_has_summary() {
    let temp = site();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&filter_command("text")).unwrap();
    assert!(output.contains("posts/old.md"));
    assert!(output.contains("deferred"));
    assert!(output.contains("2 of 5 items published, 2 removed, 1 deferred"));
}

#[test]
fn configured_report_alert_writes_file() {
    let temp = site();
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "[alert]\nkind = \"report\"\npath = \"build/deferred.json\"\n",
    )
    .unwrap();

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    cli.execute(&filter_command("json")).unwrap();

    let report = fs::read_to_string(temp.path().join("build").join("deferred.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(report["count"], 1);
    assert!(report["items"]["posts/launch.md"].is_object());
}

#[test]
fn named_alert_receives_workspace_root() {
    let temp = site();
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "[alert]\nkind = \"named\"\nname = \"cron\"\n",
    )
    .unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let expected_root = temp.path().to_path_buf();
    let mut cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    cli.register_alert(
        "cron",
        move |set: FutureSet, host: &Path, done: Done| {
            assert_eq!(host, expected_root.as_path());
            counter.fetch_add(set.len(), Ordering::SeqCst);
            done.finish();
        },
    );
    cli.execute(&filter_command("json")).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_named_alert_is_error() {
    let temp = site();
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "[alert]\nkind = \"named\"\nname = \"pager\"\n",
    )
    .unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let err = cli.execute(&filter_command("json")).unwrap_err();
    assert!(matches!(err, PublishError::UnknownAlert(name) if name == "pager"));
}

#[test]
fn failing_alert_fails_command() {
    let temp = site();
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "[alert]\nkind = \"named\"\nname = \"broken\"\n",
    )
    .unwrap();
    let mut cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    cli.register_alert("broken", |_set: FutureSet, _host: &Path, done: Done| {
        done.fail("broken", "webhook unreachable")
    });
    let err = cli.execute(&filter_command("text")).unwrap_err();
    assert!(matches!(err, PublishError::Alert { .. }));
}

#[test]
fn next_release_reports_earliest_deferred() {
    let temp = site();
    fs::write(
        temp.path().join("src").join("posts").join("sooner.md"),
        "---\npublish: 2990-05-01T10:00:00Z\n---\n",
    )
    .unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    let text = cli
        .execute(&Commands::NextRelease {
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(text, "2990-05-01T10:00:00+00:00");

    let json = cli
        .execute(&Commands::NextRelease {
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["deferred"], 2);
}

#[test]
fn next_release_none_when_future_allowed() {
    let temp = site();
    fs::write(temp.path().join(CONFIG_FILE_NAME), "future = true\n").unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let text = cli
        .execute(&Commands::NextRelease {
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(text, "none");
}

#[test]
fn explicit_config_file_and_source_dir() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    fs::create_dir_all(&content).unwrap();
    fs::write(content.join("a.md"), "---\npublish: draft\n---\n").unwrap();
    let config_path = temp.path().join("custom.toml");
    fs::write(&config_path, "draft = true\nsource = \"content\"\n").unwrap();

    let cli = CliContext::new(temp.path().to_path_buf(), Some(config_path)).unwrap();
    assert!(cli.config().draft);
    let output = cli.execute(&filter_command("json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["retained"], serde_json::json!(["a.md"]));
}

#[test]
fn invalid_format_and_missing_config_are_errors() {
    let temp = site();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    assert!(matches!(
        cli.execute(&filter_command("xml")),
        Err(PublishError::InvalidArgument(_))
    ));
    assert!(CliContext::new(
        temp.path().to_path_buf(),
        Some(temp.path().join("missing.toml"))
    )
    .is_err());
}
