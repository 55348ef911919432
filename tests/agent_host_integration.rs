//! Integration tests for the agent host.
//!
//! These tests drive the public API end to end:
//! 1. Health probes answer `200 OK` for any agent
//! 2. Authorized messages reach the processor untouched
//! 3. The JWT gate guards every route
//! 4. The echo agent answers over a real socket

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

use agent_host::adapters::echo::EchoAgent;
use agent_host::adapters::health::ReadinessFlag;
use agent_host::config::AuthConfig;
use agent_host::domain::foundation::{CallerIdentity, ProcessingError};
use agent_host::ports::{AgentApplication, ChannelAdapter, MessageProcessor};
use agent_host::AgentHost;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Adapter that must never be called in these tests
struct StubAdapter;

#[async_trait]
impl ChannelAdapter for StubAdapter {
    async fn process(
        &self,
        _request: Request<Body>,
        _agent: Arc<dyn AgentApplication>,
    ) -> Result<Response, ProcessingError> {
        Err(ProcessingError::internal("stub adapter called"))
    }
}

struct DummyAgent {
    adapter: Arc<StubAdapter>,
}

impl DummyAgent {
    fn new() -> Self {
        Self {
            adapter: Arc::new(StubAdapter),
        }
    }
}

impl AgentApplication for DummyAgent {
    fn adapter(&self) -> Arc<dyn ChannelAdapter> {
        self.adapter.clone()
    }
}

/// Processor answering 201 "accepted" and remembering what it was handed
#[derive(Default)]
struct StubProcessor {
    seen: Mutex<Vec<Seen>>,
}

struct Seen {
    method: String,
    body: Vec<u8>,
    caller: Option<CallerIdentity>,
    agent: Arc<dyn AgentApplication>,
    adapter: Arc<dyn ChannelAdapter>,
}

#[async_trait]
impl MessageProcessor for StubProcessor {
    async fn process(
        &self,
        request: Request<Body>,
        agent: Arc<dyn AgentApplication>,
        adapter: Arc<dyn ChannelAdapter>,
    ) -> Result<Response, ProcessingError> {
        let method = request.method().to_string();
        let caller = request.extensions().get::<CallerIdentity>().cloned();
        let body = to_bytes(request.into_body(), usize::MAX)
            .await
            .map_err(|e| ProcessingError::bad_request(e.to_string()))?
            .to_vec();

        self.seen.lock().unwrap().push(Seen {
            method,
            body,
            caller,
            agent,
            adapter,
        });

        Ok((StatusCode::CREATED, "accepted").into_response())
    }
}

const SIGNING_KEY: &str = "integration-signing-key";

fn bearer_for(audience: &str, key: &str) -> String {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        + 600;
    let token = encode(
        &Header::default(),
        &json!({ "aud": audience, "appid": "channel-service", "exp": exp }),
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

// =============================================================================
// Scenario: dummy agent, stub processor
// =============================================================================

#[tokio::test]
async fn dummy_agent_scenario() {
    let processor = Arc::new(StubProcessor::default());
    let router = AgentHost::new(Arc::new(DummyAgent::new()), AuthConfig::anonymous())
        .unwrap()
        .with_processor(processor.clone())
        .router();

    let response = router.clone().oneshot(get("/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");

    let response = router.clone().oneshot(get("/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");

    let response = router
        .oneshot(
            Request::post("/api/messages")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"type":"message","text":"hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_text(response).await, "accepted");

    let seen = processor.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].body, br#"{"type":"message","text":"hi"}"#.to_vec());
    assert_eq!(seen[0].caller, Some(CallerIdentity::anonymous()));
}

#[tokio::test]
async fn processor_receives_injected_agent_and_adapter() {
    let agent: Arc<dyn AgentApplication> = Arc::new(DummyAgent::new());
    let processor = Arc::new(StubProcessor::default());
    let host = AgentHost::new(agent.clone(), AuthConfig::anonymous())
        .unwrap()
        .with_processor(processor.clone());

    assert!(Arc::ptr_eq(&host.state().agent(), &agent));

    let response = host
        .router()
        .oneshot(Request::post("/api/messages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let seen = processor.seen.lock().unwrap();
    assert!(Arc::ptr_eq(&seen[0].agent, &agent));
    assert!(Arc::ptr_eq(&seen[0].adapter, &host.state().adapter()));
}

#[tokio::test]
async fn readiness_follows_the_probe() {
    let flag = Arc::new(ReadinessFlag::new("warming up"));
    let router = AgentHost::new(Arc::new(DummyAgent::new()), AuthConfig::anonymous())
        .unwrap()
        .with_readiness(flag.clone())
        .router();

    let response = router.clone().oneshot(get("/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_text(response).await, "warming up");

    // Liveness does not depend on readiness
    let response = router.clone().oneshot(get("/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    flag.set_ready(true);
    let response = router.oneshot(get("/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// JWT gate
// =============================================================================

#[tokio::test]
async fn jwt_gate_guards_every_route() {
    let processor = Arc::new(StubProcessor::default());
    let router = AgentHost::new(
        Arc::new(DummyAgent::new()),
        AuthConfig::with_client("my-bot", SIGNING_KEY),
    )
    .unwrap()
    .with_processor(processor.clone())
    .router();

    for path in ["/liveness", "/readiness"] {
        let response = router.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/messages")
                .header(header::AUTHORIZATION, bearer_for("someone-else", SIGNING_KEY))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["code"], "AUTH_ERROR");

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/messages")
                .header(header::AUTHORIZATION, bearer_for("my-bot", "wrong-key"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(processor.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn jwt_gate_admits_valid_token_with_caller_identity() {
    let processor = Arc::new(StubProcessor::default());
    let router = AgentHost::new(
        Arc::new(DummyAgent::new()),
        AuthConfig::with_client("my-bot", SIGNING_KEY),
    )
    .unwrap()
    .with_processor(processor.clone())
    .router();

    let response = router
        .oneshot(
            Request::post("/api/messages")
                .header(header::AUTHORIZATION, bearer_for("my-bot", SIGNING_KEY))
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let seen = processor.seen.lock().unwrap();
    let caller = seen[0].caller.as_ref().unwrap();
    assert!(caller.is_authenticated());
    assert_eq!(caller.app_id.as_deref(), Some("channel-service"));
}

// =============================================================================
// Echo agent over TCP
// =============================================================================

#[tokio::test]
async fn echo_agent_replies_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = tokio::sync::oneshot::channel::<()>();

    let host = AgentHost::new(Arc::new(EchoAgent::new()), AuthConfig::anonymous()).unwrap();
    let server = tokio::spawn(host.serve_listener(listener, async move {
        stopped.await.ok();
    }));

    let body = r#"{"type":"message","text":"ping"}"#;
    let request = format!(
        "POST /api/messages HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200"), "{}", raw);
    let (_, payload) = raw.split_once("\r\n\r\n").unwrap();
    let reply: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(reply["type"], "message");
    assert_eq!(reply["text"], "Echo: ping");

    stop.send(()).unwrap();
    assert!(server.await.unwrap().is_ok());
}
