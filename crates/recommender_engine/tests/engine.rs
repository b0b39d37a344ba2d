use std::sync::{Arc, Mutex};
use std::time::Duration;

use recommender_engine::{
    ClientSettings, EngineEvent, EngineHandle, FailureKind, RecommendClient, RecommendRequest,
    RequestError,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

struct ScriptedClient {
    delay: Duration,
    seen: Mutex<Vec<RecommendRequest>>,
}

impl ScriptedClient {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl RecommendClient for ScriptedClient {
    async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<serde_json::Value, RequestError> {
        self.seen.lock().unwrap().push(request.clone());
        tokio::time::sleep(self.delay).await;
        Ok(json!({ "echo": request.prompt, "top_k": request.top_k }))
    }
}

fn request(prompt: &str) -> RecommendRequest {
    RecommendRequest {
        prompt: prompt.to_string(),
        top_k: 3,
    }
}

#[test]
fn completes_with_client_payload() {
    let client = ScriptedClient::new(Duration::ZERO);
    let engine = EngineHandle::with_client(client.clone()).expect("engine");

    engine.send(4, request("analyst"));

    let event = engine.recv_timeout(WAIT).expect("completion");
    assert_eq!(
        event,
        EngineEvent::Completed {
            request_id: 4,
            result: Ok(json!({ "echo": "analyst", "top_k": 3 })),
        }
    );
    assert_eq!(client.seen.lock().unwrap().as_slice(), &[request("analyst")]);
}

#[test]
fn cancel_resolves_in_flight_request_as_cancelled() {
    let client = ScriptedClient::new(Duration::from_secs(30));
    let engine = EngineHandle::with_client(client).expect("engine");

    engine.send(1, request("first"));
    engine.cancel(1);

    match engine.recv_timeout(WAIT).expect("completion") {
        EngineEvent::Completed { request_id, result } => {
            assert_eq!(request_id, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
        }
    }
}

#[test]
fn cancel_of_unknown_request_is_ignored() {
    let client = ScriptedClient::new(Duration::ZERO);
    let engine = EngineHandle::with_client(client).expect("engine");

    engine.cancel(99);
    engine.send(1, request("analyst"));

    match engine.recv_timeout(WAIT).expect("completion") {
        EngineEvent::Completed { request_id, result } => {
            assert_eq!(request_id, 1);
            assert!(result.is_ok());
        }
    }
    assert!(engine.try_recv().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn reports_http_failure_from_real_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let settings = ClientSettings::with_endpoint(format!("{}/recommend", server.uri()));
    let engine = EngineHandle::new(settings).expect("engine");
    engine.send(1, request("analyst"));

    let event = tokio::task::spawn_blocking(move || engine.recv_timeout(WAIT))
        .await
        .unwrap()
        .expect("completion");

    match event {
        EngineEvent::Completed { request_id, result } => {
            assert_eq!(request_id, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(503));
        }
    }
}
