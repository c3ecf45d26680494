// Tool discovery tests - directory loading, artifact execution and dispatch
#![cfg(unix)]

#[path = "../common/mod.rs"]
mod common;

use common::write_tool_script;
use serde_json::json;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::tempdir;
use toolhost_core::config::ToolSettings;
use toolhost_core::tooling::{TOOL_NOT_FOUND, ToolDispatcher, ToolRegistry};
use toolhost_core::types::ToolCallRequest;

fn settings(dir: &std::path::Path) -> ToolSettings {
    settings_with_timeout(dir, Duration::from_secs(10))
}

fn settings_with_timeout(dir: &std::path::Path, timeout: Duration) -> ToolSettings {
    ToolSettings {
        dir: dir.to_path_buf(),
        timeout,
        ..ToolSettings::default()
    }
}

#[tokio::test]
async fn load_all_skips_broken_artifacts_and_keeps_the_rest() {
    let dir = tempdir().unwrap();
    write_tool_script(
        dir.path(),
        "tool-greet.sh",
        Some(r#"{"description": "Greets someone", "type": "object", "properties": {"name": {"type": "string"}}, "required": ["name"]}"#),
        r#"sed -n 's/.*"name": *"\([^"]*\)".*/hello \1/p'"#,
    );
    write_tool_script(dir.path(), "tool-bad_schema.sh", Some("this is not json"), "echo never");
    write_tool_script(dir.path(), "tool-plain.sh", None, "echo plain");
    fs::write(dir.path().join("README.md"), "not a tool").unwrap();
    fs::write(dir.path().join("tool-not_executable.sh"), "#!/bin/sh\necho hi\n").unwrap();

    let registry = ToolRegistry::new(settings(dir.path()));
    let summary = registry.load_all(dir.path()).await.unwrap();

    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(registry.names(), vec!["greet".to_string(), "plain".to_string()]);

    let snapshot = registry.snapshot();
    let greet = snapshot.get("greet").unwrap();
    assert_eq!(greet.description, "Greets someone");
    assert_eq!(greet.parameter_schema["required"], json!(["name"]));
    let plain = snapshot.get("plain").unwrap();
    assert_eq!(plain.description, "Executes the plain tool");
    assert_eq!(plain.parameter_schema["properties"], json!({}));
}

#[tokio::test]
async fn missing_tool_directory_is_created() {
    let root = tempdir().unwrap();
    let dir = root.path().join("tool");

    let registry = ToolRegistry::new(settings(&dir));
    let summary = registry.load_all(&dir).await.unwrap();

    assert!(dir.is_dir());
    assert_eq!(summary.loaded, 0);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn artifacts_receive_arguments_on_stdin() {
    let dir = tempdir().unwrap();
    write_tool_script(
        dir.path(),
        "tool-greet.sh",
        None,
        r#"sed -n 's/.*"name": *"\([^"]*\)".*/hello \1/p'"#,
    );
    let registry = ToolRegistry::new(settings(dir.path()));
    registry.load_all(dir.path()).await.unwrap();

    let results = ToolDispatcher::new()
        .dispatch(
            &registry.snapshot(),
            &[
                ToolCallRequest::new("greet", json!("{\"name\": \"Ada\"}")),
                ToolCallRequest::new("missing", json!({})),
                ToolCallRequest::new("greet", json!({"name": "Linus"})),
            ],
        )
        .await;

    let contents: Vec<_> = results.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["hello Ada", TOOL_NOT_FOUND, "hello Linus"]);
    assert_eq!(results[0].raw_arguments, json!({"name": "Ada"}));
}

#[tokio::test]
async fn failing_artifact_becomes_error_content() {
    let dir = tempdir().unwrap();
    write_tool_script(
        dir.path(),
        "tool-flaky.sh",
        None,
        "echo 'upstream timed out' >&2\nexit 3",
    );
    let registry = ToolRegistry::new(settings(dir.path()));
    registry.load_all(dir.path()).await.unwrap();

    let results = ToolDispatcher::new()
        .dispatch(&registry.snapshot(), &[ToolCallRequest::new("flaky", json!({}))])
        .await;

    assert!(results[0].content.starts_with("Error: "));
    assert!(results[0].content.contains("upstream timed out"));
}

#[tokio::test]
async fn register_path_replaces_tool_of_same_name() {
    let dir = tempdir().unwrap();
    let path = write_tool_script(dir.path(), "tool-version.sh", None, "echo v1");
    let registry = ToolRegistry::new(settings(dir.path()));

    assert_eq!(registry.register_path(&path).await.unwrap(), "version");
    write_tool_script(dir.path(), "tool-version.sh", None, "echo v2");
    assert_eq!(registry.register_path(&path).await.unwrap(), "version");

    assert_eq!(registry.len(), 1);
    let results = ToolDispatcher::new()
        .dispatch(&registry.snapshot(), &[ToolCallRequest::new("version", json!({}))])
        .await;
    assert_eq!(results[0].content, "v2");
}

#[tokio::test]
async fn slow_artifact_times_out() {
    let dir = tempdir().unwrap();
    write_tool_script(dir.path(), "tool-slow.sh", None, "sleep 5\necho finally");
    let registry = ToolRegistry::new(settings_with_timeout(dir.path(), Duration::from_secs(1)));
    registry.load_all(dir.path()).await.unwrap();

    let started = Instant::now();
    let results = tokio::time::timeout(
        Duration::from_secs(4),
        ToolDispatcher::new()
            .dispatch(&registry.snapshot(), &[ToolCallRequest::new("slow", json!({}))]),
    )
    .await
    .expect("dispatch should finish once the tool timeout fires");

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(results[0].content.starts_with("Error: tool timed out"));
}

#[tokio::test]
async fn large_payload_echo_is_bounded_by_the_timeout() {
    let dir = tempdir().unwrap();
    write_tool_script(dir.path(), "tool-echo.sh", None, "cat\nsleep 5");
    let registry = ToolRegistry::new(settings_with_timeout(dir.path(), Duration::from_secs(2)));
    registry.load_all(dir.path()).await.unwrap();
    let blob = "x".repeat(400_000);

    let started = Instant::now();
    let results = tokio::time::timeout(
        Duration::from_secs(8),
        ToolDispatcher::new().dispatch(
            &registry.snapshot(),
            &[ToolCallRequest::new("echo", json!({ "blob": blob }))],
        ),
    )
    .await
    .expect("dispatch should finish once the tool timeout fires");

    assert!(started.elapsed() < Duration::from_secs(8));
    assert!(results[0].content.starts_with("Error: tool timed out"));
}
