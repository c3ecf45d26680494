// REST surface tests - real server on an ephemeral port driven with reqwest

#[path = "../common/mod.rs"]
mod common;

use common::{EchoGateway, ScriptedGateway, empty_registry, orchestrator, spawn_server, tool_call};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use toolhost_core::model::{ModelError, ModelResponse};
use toolhost_core::tooling::ToolDescriptor;

async fn post(base: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

async fn get(base: &str, path: &str) -> (StatusCode, Value) {
    let response = reqwest::get(format!("{base}{path}")).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

async fn delete(base: &str, path: &str) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .delete(format!("{base}{path}"))
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn chat_with_clock_tool_returns_second_completion() {
    let registry = empty_registry();
    registry.register(ToolDescriptor::from_fn("obtenir_heure_actuelle", |_| {
        Ok("14:05".to_string())
    }));
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(tool_call("obtenir_heure_actuelle", json!({}))),
        Ok(ModelResponse::new("Il est 14:05.")),
    ]));
    let base = spawn_server(orchestrator(Arc::clone(&gateway), registry)).await;

    let (status, body) = post(&base, "/chat", json!({"content": "what time is it?"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Il est 14:05.");
    assert_eq!(body["session_id"], "default");
    assert_eq!(body["tool_used"], "obtenir_heure_actuelle");
    assert_eq!(body["tool_result"], "14:05");

    let requests = gateway.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].tools[0].name, "obtenir_heure_actuelle");

    let (status, history) = get(&base, "/conversation/default").await;
    assert_eq!(status, StatusCode::OK);
    let roles: Vec<_> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["role"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(roles, vec!["user", "assistant", "tool", "assistant"]);
    assert_eq!(history[2]["tool_name"], "obtenir_heure_actuelle");
    assert_eq!(history[2]["content"], "obtenir_heure_actuelle returned: 14:05");
}

#[tokio::test]
async fn plain_chat_omits_tool_fields() {
    let gateway = ScriptedGateway::new(vec![Ok(ModelResponse::new("hello there"))]);
    let base = spawn_server(orchestrator(gateway, empty_registry())).await;

    let (status, body) = post(&base, "/chat", json!({"content": "hi", "session_id": "s1"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "hello there");
    assert_eq!(body["session_id"], "s1");
    assert!(body.get("tool_used").is_none());
    assert!(body.get("tool_result").is_none());
}

#[tokio::test]
async fn concurrent_sessions_keep_independent_histories() {
    let base = spawn_server(orchestrator(EchoGateway, empty_registry())).await;

    let turns = ["alpha", "beta"].into_iter().flat_map(|session| {
        let base = base.clone();
        (0..3).map(move |n| {
            let base = base.clone();
            async move {
                post(
                    &base,
                    "/chat",
                    json!({"content": format!("{session}-{n}"), "session_id": session}),
                )
                .await
            }
        })
    });
    for (status, _) in futures::future::join_all(turns).await {
        assert_eq!(status, StatusCode::OK);
    }

    for session in ["alpha", "beta"] {
        let (status, history) = get(&base, &format!("/conversation/{session}")).await;
        assert_eq!(status, StatusCode::OK);
        let messages = history.as_array().unwrap();
        assert_eq!(messages.len(), 6);
        for pair in messages.chunks(2) {
            let user = pair[0]["content"].as_str().unwrap();
            assert!(user.starts_with(session));
            assert_eq!(pair[0]["role"], "user");
            assert_eq!(pair[1]["role"], "assistant");
            assert_eq!(pair[1]["content"], format!("echo: {user}"));
        }
    }
}

#[tokio::test]
async fn delete_is_idempotent_and_get_then_404s() {
    let gateway = ScriptedGateway::new(vec![Ok(ModelResponse::new("noted"))]);
    let base = spawn_server(orchestrator(gateway, empty_registry())).await;

    let (status, body) = delete(&base, "/conversation/ghost").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session ghost deleted");

    post(&base, "/chat", json!({"content": "remember me", "session_id": "real"})).await;
    let (status, _) = get(&base, "/conversation/real").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = delete(&base, "/conversation/real").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get(&base, "/conversation/real").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("real"));

    let (status, _) = get(&base, "/conversation/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_content_is_a_bad_request() {
    let base = spawn_server(orchestrator(ScriptedGateway::default(), empty_registry())).await;

    let (status, body) = post(&base, "/chat", json!({"content": "   "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn model_failure_is_a_bad_gateway() {
    let gateway = ScriptedGateway::new(vec![Err(ModelError::status(
        "scripted",
        503,
        "overloaded",
    ))]);
    let base = spawn_server(orchestrator(gateway, empty_registry())).await;

    let (status, body) = post(&base, "/chat", json!({"content": "hello"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("overloaded"));

    let (_, history) = get(&base, "/conversation/default").await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn status_reports_model_tools_and_sessions() {
    let registry = empty_registry();
    registry.register(ToolDescriptor::from_fn("obtenir_heure_actuelle", |_| {
        Ok("14:05".to_string())
    }));
    let gateway = ScriptedGateway::new(vec![
        Ok(ModelResponse::new("one")),
        Ok(ModelResponse::new("two")),
    ]);
    let base = spawn_server(orchestrator(gateway, registry)).await;
    post(&base, "/chat", json!({"content": "a", "session_id": "x"})).await;
    post(&base, "/chat", json!({"content": "b", "session_id": "y"})).await;

    let (status, body) = get(&base, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["model"], "llama3.1");
    assert_eq!(body["loaded_tools"], json!(["obtenir_heure_actuelle"]));
    assert_eq!(body["active_sessions"], 2);
}

#[tokio::test]
async fn register_tool_rejects_missing_artifact() {
    let base = spawn_server(orchestrator(ScriptedGateway::default(), empty_registry())).await;

    let (status, body) = post(
        &base,
        "/register_tool",
        json!({"tool_path": "/nonexistent/tool-nothing.sh"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[cfg(unix)]
#[tokio::test]
async fn registered_tool_is_advertised_and_last_write_wins() {
    use common::write_tool_script;

    let dir = tempfile::tempdir().unwrap();
    let path = write_tool_script(
        dir.path(),
        "tool-weather.sh",
        Some(r#"{"type": "object", "properties": {"city": {"type": "string"}}, "required": ["city"]}"#),
        "echo cloudy",
    );
    let gateway = Arc::new(ScriptedGateway::new(vec![
        Ok(tool_call("weather", json!({"city": "Paris"}))),
        Ok(ModelResponse::new("It is sunny in Paris.")),
    ]));
    let base = spawn_server(orchestrator(Arc::clone(&gateway), empty_registry())).await;

    let tool_path = path.to_string_lossy().to_string();
    let (status, body) = post(&base, "/register_tool", json!({"tool_path": tool_path})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tool weather registered successfully");

    write_tool_script(dir.path(), "tool-weather.sh", None, "echo sunny");
    let (status, _) = post(&base, "/register_tool", json!({"tool_path": tool_path})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, status_body) = get(&base, "/status").await;
    assert_eq!(status_body["loaded_tools"], json!(["weather"]));

    let (status, body) = post(&base, "/chat", json!({"content": "weather in Paris?"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool_used"], "weather");
    assert_eq!(body["tool_result"], "sunny");

    let advertised = &gateway.requests()[0].tools;
    assert_eq!(advertised.len(), 1);
    assert_eq!(advertised[0].parameters["properties"], json!({}));
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let base = spawn_server(orchestrator(ScriptedGateway::default(), empty_registry())).await;

    let (status, body) = get(&base, "/api-doc/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    for path in ["/status", "/register_tool", "/chat", "/conversation/{session_id}"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
}
