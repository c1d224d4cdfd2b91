//! Gemini client against a local mock server.

use juggler_core::assistant::{GeminiAssistant, PlanningAssistant};
use juggler_core::{AssistantError, PlanItem, ProjectDna, TaskId};
use mockito::{Matcher, Server};
use serde_json::json;

const PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn wrap(text: &str) -> String {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}

#[tokio::test]
async fn test_decompose_goal_parses_structured_output() {
    let mut server = Server::new_async().await;
    let payload = r#"[
        {"subtask": "Pick a stack", "effort_score": 2},
        {"subtask": "Build checkout", "effort_score": 8.4},
        {"subtask": "  ", "effort_score": 3}
    ]"#;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(wrap(payload))
        .create_async()
        .await;

    let gemini = GeminiAssistant::new(&server.url(), "gemini-test", "test-key").unwrap();
    let tasks = gemini.decompose_goal("Launch a store").await.unwrap();

    mock.assert_async().await;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].subtask, "Pick a stack");
    assert_eq!(tasks[1].effort_score, 8);
}

#[tokio::test]
async fn test_plan_day_roundtrip() {
    let mut server = Server::new_async().await;
    let payload = r#"[{"task_id": "t1", "start_time": "9:00 AM", "duration_minutes": 90}]"#;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::Regex("Write chapter".into()))
        .with_status(200)
        .with_body(wrap(payload))
        .create_async()
        .await;

    let gemini = GeminiAssistant::new(&server.url(), "gemini-test", "k").unwrap();
    let items = vec![PlanItem {
        task_id: TaskId::from("t1"),
        description: "Write chapter".into(),
        effort_score: 9,
        project_dna: Some(ProjectDna::DeepWork),
    }];
    let plan = gemini.plan_day(&items).await.unwrap();

    mock.assert_async().await;
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].task_id, TaskId::from("t1"));
    assert_eq!(plan[0].duration_minutes, 90);
}

#[tokio::test]
async fn test_draft_returns_plain_text() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(wrap("# Intro\n\nHello"))
        .create_async()
        .await;

    let gemini = GeminiAssistant::new(&server.url(), "gemini-test", "k").unwrap();
    assert_eq!(gemini.draft_for("Intro").await.unwrap(), "# Intro\n\nHello");
}

#[tokio::test]
async fn test_http_error_maps_to_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let gemini = GeminiAssistant::new(&server.url(), "gemini-test", "k").unwrap();
    match gemini.draft_for("x").await {
        Err(AssistantError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_payload() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(wrap("not json at all"))
        .create_async()
        .await;

    let gemini = GeminiAssistant::new(&server.url(), "gemini-test", "k").unwrap();
    assert!(matches!(
        gemini.decompose_goal("x").await,
        Err(AssistantError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_empty_plan_skips_the_network() {
    let gemini = GeminiAssistant::new("http://127.0.0.1:9", "gemini-test", "k").unwrap();
    assert!(gemini.plan_day(&[]).await.unwrap().is_empty());
}
