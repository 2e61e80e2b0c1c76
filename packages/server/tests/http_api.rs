//! Router-level tests for the HTTP API.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use relaychat_server::{
    domain::MessageStore,
    infrastructure::{ConnectionRegistry, bus::FanoutBus, store::EphemeralMessageStore},
    ui::{Server, state::AppState},
    usecase::{GetHistoryUseCase, IngestMessageUseCase},
};

const TEST_INSTANCE_ID: u32 = 4242;

fn test_router() -> Router {
    let store: Arc<dyn MessageStore> = Arc::new(EphemeralMessageStore::new());
    let bus = Arc::new(FanoutBus::local_only());
    let registry = Arc::new(ConnectionRegistry::new());
    let state = Arc::new(AppState {
        ingest_message_usecase: Arc::new(IngestMessageUseCase::new(
            store.clone(),
            bus,
            registry.clone(),
        )),
        get_history_usecase: Arc::new(GetHistoryUseCase::new(store)),
        registry,
        instance_id: TEST_INSTANCE_ID,
    });
    Server::new(state).router()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/messages")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_post_message_returns_created_message() {
    // given:
    let router = test_router();

    // when:
    let response = router
        .oneshot(post_request(r#"{"author":"alice","text":"hi"}"#))
        .await
        .unwrap();

    // then:
    assert_eq!(response.status(), StatusCode::OK);
    let message = body_json(response).await;
    assert_eq!(message["author"], "alice");
    assert_eq!(message["text"], "hi");
    assert!(message.get("id").is_none());
    assert!(message["created_at"].is_string());
}

#[tokio::test]
async fn test_post_message_rejects_missing_fields() {
    // given:
    let router = test_router();

    // when:
    let response = router
        .oneshot(post_request(r#"{"author":"alice"}"#))
        .await
        .unwrap();

    // then:
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "author and text required");
}

#[tokio::test]
async fn test_post_message_rejects_malformed_body() {
    // given:
    let router = test_router();

    // when:
    let response = router.oneshot(post_request("not json")).await.unwrap();

    // then:
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error"], "invalid json");
}

#[tokio::test]
async fn test_get_messages_returns_recent_history_oldest_first() {
    // given: three messages posted in order
    let router = test_router();
    for text in ["m1", "m2", "m3"] {
        let body = format!(r#"{{"author":"alice","text":"{}"}}"#, text);
        let response = router.clone().oneshot(post_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // when:
    let response = router
        .oneshot(get_request("/api/messages?limit=2"))
        .await
        .unwrap();

    // then:
    assert_eq!(response.status(), StatusCode::OK);
    let history = body_json(response).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["text"], "m2");
    assert_eq!(history[1]["text"], "m3");
}

#[tokio::test]
async fn test_get_messages_defaults_to_empty_history() {
    // given:
    let router = test_router();

    // when:
    let response = router.oneshot(get_request("/api/messages")).await.unwrap();

    // then:
    assert_eq!(response.status(), StatusCode::OK);
    let history = body_json(response).await;
    assert_eq!(history.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_info_reports_instance_identity_and_counters() {
    // given: one message already ingested
    let router = test_router();
    router
        .clone()
        .oneshot(post_request(r#"{"author":"alice","text":"hi"}"#))
        .await
        .unwrap();

    // when:
    let response = router.oneshot(get_request("/info")).await.unwrap();

    // then:
    assert_eq!(response.status(), StatusCode::OK);
    let info = body_json(response).await;
    assert_eq!(info["pid"], TEST_INSTANCE_ID);
    assert_eq!(info["connections"], 0);
    assert_eq!(info["messages_seen"], 1);
}

#[tokio::test]
async fn test_health_check() {
    // given:
    let router = test_router();

    // when:
    let response = router.oneshot(get_request("/api/health")).await.unwrap();

    // then:
    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "ok");
}
