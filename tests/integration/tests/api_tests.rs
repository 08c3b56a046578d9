//! API integration tests
//!
//! Every test boots its own server over an in-memory store, so they run
//! self-contained and in parallel.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures_util::StreamExt;
use integration_tests::{assert_error, assert_json, fixtures, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

const ALICE: &str = "alice-device";
const BOB: &str = "bob-device";

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health", ALICE).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");

    let response = server.get("/health/ready", ALICE).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Bubble lifecycle
// ============================================================================

#[tokio::test]
async fn test_bubble_create_and_vote_scenario() {
    let server = TestServer::start().await.expect("Failed to start server");

    // Alice drops a bubble
    let bubble = server
        .create_bubble(ALICE, 52.37, 4.90, "Test")
        .await
        .unwrap();
    assert_eq!(bubble["score"], 0);
    assert_eq!(bubble["title"], "Test");
    assert!(bubble["bot_source"].is_null());
    assert!(bubble.get("creator_fingerprint").is_none());
    let id = bubble["id"].as_str().unwrap().to_string();

    // It shows up in the visible list
    let response = server.get("/api/bubbles", BOB).await.unwrap();
    let listed: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"].as_str(), Some(id.as_str()));

    // Bob upvotes
    let response = server
        .post_json(&format!("/api/bubbles/{id}/vote"), BOB, &json!({"vote": 1}))
        .await
        .unwrap();
    let receipt: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(receipt["newScore"], 1);
    assert_eq!(receipt["yourVote"], 1);

    // Same direction again is rejected
    let response = server
        .post_json(&format!("/api/bubbles/{id}/vote"), BOB, &json!({"vote": 1}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "ALREADY_VOTED");

    // Reversal moves the score by -2
    let response = server
        .post_json(&format!("/api/bubbles/{id}/vote"), BOB, &json!({"vote": -1}))
        .await
        .unwrap();
    let receipt: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(receipt["newScore"], -1);
    assert_eq!(receipt["yourVote"], -1);

    // The creator cannot vote at all
    for vote in [1, -1] {
        let response = server
            .post_json(
                &format!("/api/bubbles/{id}/vote"),
                ALICE,
                &json!({"vote": vote}),
            )
            .await
            .unwrap();
        let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
        assert_eq!(code, "SELF_VOTE");
    }
}

#[tokio::test]
async fn test_own_vote_roundtrip() {
    let server = TestServer::start().await.expect("Failed to start server");
    let bubble = server
        .create_bubble(ALICE, 52.37, 4.90, "Test")
        .await
        .unwrap();
    let id = bubble["id"].as_str().unwrap();

    let response = server
        .get(&format!("/api/bubbles/{id}/vote"), BOB)
        .await
        .unwrap();
    let own: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(own["vote"], 0);

    server
        .post_json(&format!("/api/bubbles/{id}/vote"), BOB, &json!({"vote": -1}))
        .await
        .unwrap();

    let response = server
        .get(&format!("/api/bubbles/{id}/vote"), BOB)
        .await
        .unwrap();
    let own: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(own["vote"], -1);
}

#[tokio::test]
async fn test_create_bubble_missing_fields() {
    let server = TestServer::start().await.expect("Failed to start server");

    let form = reqwest::multipart::Form::new().text("lat", "52.37");
    let response = server
        .client
        .post(server.url("/api/bubbles"))
        .header("x-client-fingerprint", ALICE)
        .multipart(form)
        .send()
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_bubble_with_media() {
    let server = TestServer::start().await.expect("Failed to start server");

    let media = reqwest::multipart::Part::bytes(b"not really a png".to_vec())
        .file_name("sunset.png");
    let form = reqwest::multipart::Form::new()
        .text("lat", "52.37")
        .text("lng", "4.90")
        .text("title", "Sunset at the canal")
        .part("media", media);

    let response = server
        .client
        .post(server.url("/api/bubbles"))
        .header("x-client-fingerprint", ALICE)
        .multipart(form)
        .send()
        .await
        .unwrap();
    let bubble: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(bubble["media_type"], "image");
    assert!(bubble["media_url"]
        .as_str()
        .unwrap()
        .starts_with("/uploads/"));
}

#[tokio::test]
async fn test_vote_error_paths() {
    let server = TestServer::start().await.expect("Failed to start server");
    let bubble = server
        .create_bubble(ALICE, 52.37, 4.90, "Test")
        .await
        .unwrap();
    let id = bubble["id"].as_str().unwrap();

    // Vote value outside {-1, 1}
    let response = server
        .post_json(&format!("/api/bubbles/{id}/vote"), BOB, &json!({"vote": 0}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown (but well-formed) bubble id
    let missing = uuid::Uuid::new_v4();
    let response = server
        .post_json(
            &format!("/api/bubbles/{missing}/vote"),
            BOB,
            &json!({"vote": 1}),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_BUBBLE");

    // Malformed id
    let response = server
        .post_json("/api/bubbles/not-a-uuid/vote", BOB, &json!({"vote": 1}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Suggestion board
// ============================================================================

#[tokio::test]
async fn test_suggestion_toggle_flow() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_json(
            "/api/suggestions",
            ALICE,
            &json!({"title": "Add friend groups", "description": "Share bubbles privately"}),
        )
        .await
        .unwrap();
    let suggestion: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(suggestion["votes"], 0);
    let id = suggestion["id"].as_str().unwrap().to_string();

    // Toggle on
    let response = server
        .post_empty(&format!("/api/suggestions/{id}/vote"), BOB)
        .await
        .unwrap();
    let receipt: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(receipt["votes"], 1);
    assert_eq!(receipt["voted"], true);

    let response = server
        .get(&format!("/api/suggestions/{id}/vote"), BOB)
        .await
        .unwrap();
    let status: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status["voted"], true);

    // Toggle off restores the prior state
    let response = server
        .post_empty(&format!("/api/suggestions/{id}/vote"), BOB)
        .await
        .unwrap();
    let receipt: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(receipt["votes"], 0);
    assert_eq!(receipt["voted"], false);
}

#[tokio::test]
async fn test_suggestion_validation_and_ranking() {
    let server = TestServer::start().await.expect("Failed to start server");

    // Too-short title
    let response = server
        .post_json("/api/suggestions", ALICE, &json!({"title": "abc"}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown suggestion
    let missing = uuid::Uuid::new_v4();
    let response = server
        .post_empty(&format!("/api/suggestions/{missing}/vote"), BOB)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Ranking: the voted suggestion lists first
    for title in ["First suggestion", "Second suggestion"] {
        server
            .post_json("/api/suggestions", ALICE, &json!({"title": title}))
            .await
            .unwrap();
    }
    let response = server.get("/api/suggestions", ALICE).await.unwrap();
    let listed: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    let second_id = listed
        .iter()
        .find(|s| s["title"] == "Second suggestion")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .post_empty(&format!("/api/suggestions/{second_id}/vote"), BOB)
        .await
        .unwrap();

    let response = server.get("/api/suggestions", ALICE).await.unwrap();
    let listed: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed[0]["title"], "Second suggestion");
}

// ============================================================================
// Bot importer
// ============================================================================

#[tokio::test]
async fn test_scrape_imports_and_deduplicates() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post_empty("/api/scrape", ALICE).await.unwrap();
    let report: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report["imported"], 2);

    // Bot bubbles are visible and tagged
    let response = server.get("/api/bubbles", ALICE).await.unwrap();
    let listed: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|b| b["bot_source"] == "eventbrite"));

    // A second cycle imports nothing new
    let response = server.post_empty("/api/scrape", ALICE).await.unwrap();
    let report: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report["imported"], 0);

    let response = server.get("/api/bubbles", ALICE).await.unwrap();
    let listed: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_failing_source_does_not_block_others() {
    use std::sync::Arc;

    let server = TestServer::start_with_sources(vec![
        Arc::new(fixtures::FailingSource),
        Arc::new(fixtures::StubSource::two_events()),
    ])
    .await
    .expect("Failed to start server");

    let response = server.post_empty("/api/scrape", ALICE).await.unwrap();
    let report: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report["imported"], 2);
}

// ============================================================================
// Distant-bubble purge
// ============================================================================

#[tokio::test]
async fn test_cleanup_purges_distant_bubbles() {
    let server = TestServer::start().await.expect("Failed to start server");

    server
        .create_bubble(ALICE, 52.3676, 4.9041, "Local")
        .await
        .unwrap();
    server
        .create_bubble(ALICE, 48.8566, 2.3522, "Distant")
        .await
        .unwrap();

    let response = server.post_empty("/api/cleanup", ALICE).await.unwrap();
    let purged: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(purged["deleted"], 1);

    let response = server.get("/api/bubbles", ALICE).await.unwrap();
    let listed: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Local");
}

// ============================================================================
// Live channel
// ============================================================================

#[tokio::test]
async fn test_live_channel_receives_new_bubble() {
    let server = TestServer::start().await.expect("Failed to start server");

    let (mut ws, _) = tokio_tungstenite::connect_async(server.ws_url("/api/live"))
        .await
        .expect("WebSocket connect failed");

    server
        .create_bubble(ALICE, 52.37, 4.90, "Broadcast me")
        .await
        .unwrap();

    let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for event")
        .expect("stream ended")
        .expect("socket error");
    let event: Value = serde_json::from_str(frame.to_text().unwrap()).unwrap();

    assert_eq!(event["type"], "new_bubble");
    assert_eq!(event["bubble"]["title"], "Broadcast me");
}
