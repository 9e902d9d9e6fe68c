//! Integration tests for the HTTP API over a real socket.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tripdesk::server::{build_router, AppState};
use tripdesk::store::ContentStore;

const SEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/seed.sql");

struct TestServer {
    addr: SocketAddr,
    cancel: CancellationToken,
    handle: JoinHandle<std::io::Result<()>>,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let store = ContentStore::open_in_memory()
            .await
            .expect("Failed to open store");
        store
            .run_script_file(SEED)
            .await
            .expect("Failed to apply seed");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get address");
        let router = build_router(AppState::new(store), true);

        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown.cancelled().await;
                })
                .await
        });

        Self {
            addr,
            cancel,
            handle,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        let status = response.status();
        (status, response.json().await.expect("Invalid JSON"))
    }

    async fn send(&self, method: reqwest::Method, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .request(method, self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Request failed");
        let status = response.status();
        (status, response.json().await.expect("Invalid JSON"))
    }

    async fn stop(self) {
        self.cancel.cancel();
        let result = timeout(Duration::from_secs(2), self.handle).await;
        assert!(result.is_ok(), "Server should shut down within timeout");
    }
}

#[tokio::test]
async fn test_chatbot_endpoints() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/api/chatbot").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["training"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["training"][0]["order"], 1);

    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/api/chatbot",
            json!({"message": "How much is the desert trip?"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    // "how much" (8) beats "desert" (6).
    assert!(body["response"]
        .as_str()
        .is_some_and(|r| r.starts_with("Private journeys start")));

    let (status, body) = server
        .send(reqwest::Method::POST, "/api/chatbot", json!({"message": 7}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Message is required"}));

    server.stop().await;
}

#[tokio::test]
async fn test_content_endpoints() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/api/journeys?category=desert").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["journeys"][0]["slug"], "long-way-to-the-dunes");
    assert_eq!(body["journeys"][0]["hidden"], false);

    let (status, body) = server.get("/api/journeys/imperial-cities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["journey"]["hidden"], true);

    let (status, body) = server.get("/api/journeys/atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Journey not found");

    let (_, body) = server
        .get("/api/related-journeys?region=north&exclude=blue-and-white")
        .await;
    assert_eq!(body["journeys"][0]["slug"], "imperial-cities");
    assert_eq!(body["journeys"].as_array().map(Vec::len), Some(1));

    let (_, body) = server.get("/api/related-journeys").await;
    assert_eq!(body, json!({"journeys": []}));

    let (status, body) = server.get("/api/day-trips").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dayTrips"][0]["slug"], "ourika-valley");
    assert_eq!(body["dayTrips"][0]["departureCity"], "Marrakech");
    assert_eq!(
        body["dayTrips"][0]["includes"],
        json!(["Driver", "Mountain guide", "Lunch"])
    );
    assert_eq!(body["heroImage"], "https://images.example.com/day-trips.jpg");

    let (_, body) = server.get("/api/footer").await;
    assert_eq!(body["columns"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["contact"][1]["url"], "https://wa.me/212600000000");
    assert_eq!(
        body["newsletter"]["backgroundImage"],
        "https://drive.google.com/thumbnail?id=1SampleImageId&sz=w1920"
    );
    assert!(!body["copyright"]
        .as_str()
        .unwrap_or_default()
        .contains("{year}"));

    let (status, body) = server.get("/api/guides").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guides"][0]["slug"], "hammam");

    let (status, body) = server.get("/api/testimonials").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["testimonials"][0]["journeyTitle"], "The Long Way to the Dunes");

    let (status, body) = server.get("/api/gentle-journeys").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settings"]["heroTitle"], "Built for you. Not adapted.");

    server.stop().await;
}

#[tokio::test]
async fn test_quote_flow() {
    let server = TestServer::start().await;

    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/api/plan-your-trip",
            json!({
                "name": "Amina",
                "email": "amina@example.com",
                "groupSize": 3,
                "interests": ["Food", "Craft"],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let quote_id = body["quoteId"].as_str().expect("quoteId").to_string();

    let (_, body) = server
        .get("/api/plan-your-trip?email=AMINA@example.com")
        .await;
    assert_eq!(body, json!({"exists": true}));

    let (status, _) = server
        .send(
            reqwest::Method::PATCH,
            &format!("/api/admin/quotes/{quote_id}"),
            json!({"status": "contacted"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server.get(&format!("/api/admin/quotes/{quote_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["status"], "contacted");
    assert_eq!(body["quote"]["interests"], "Food, Craft");
    assert_eq!(body["quote"]["groupSize"], 3);

    let (status, body) = server
        .send(
            reqwest::Method::PATCH,
            &format!("/api/admin/quotes/{quote_id}"),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Status is required");

    let (_, body) = server.get("/api/admin/quotes").await;
    assert_eq!(body["quotes"][0]["id"], quote_id);

    server.stop().await;
}

#[tokio::test]
async fn test_proposals_bookings_and_stories() {
    let server = TestServer::start().await;

    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/api/admin/proposals",
            json!({"clientName": "Nadia", "days": 6, "routePoints": [{"city": "Fes"}]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let proposal_id = body["proposalId"].as_str().expect("proposalId").to_string();

    let (status, body) = server.get(&format!("/api/proposals?id={proposal_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["proposal"]["routePoints"], json!([{"city": "Fes"}]));
    assert_eq!(body["proposal"]["daysList"], json!([]));

    let (status, body) = server.get("/api/proposals").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Proposal ID is required");

    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/api/overnight-booking",
            json!({"guestName": "Leo", "guestEmail": "leo@example.com"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/api/stories/add",
            json!({"stories": [{"slug": "blue-city"}, {"title": "untitled"}]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "added": ["blue-city"],
            "skipped": [],
            "errors": ["Story missing slug"],
        })
    );

    server.stop().await;
}
