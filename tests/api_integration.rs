mod helpers;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use helpers::test_app;

const ARTICLE_HTML: &str = r#"<html><body>
<div class="mw-content-ltr mw-parser-output">
  <p>Ferris is the unofficial mascot of the Rust programming language.[1]</p>
  <p>The crab appears on "stickers" and   conference slides.</p>
</div>
</body></html>"#;

async fn upstream() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Ferris"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ARTICLE_HTML)
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/models/sshleifer/distilbart-cnn-12-6"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"summary_text": "Ferris is Rust's crab."}])),
        )
        .mount(&server)
        .await;

    server
}

/// Mock-served pages live on a local host, so they are read as generic pages.
fn page_url(server: &MockServer, page: &str) -> String {
    format!("{}/wiki/{page}", server.uri())
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_summary_then_feedback_round() {
    let server = upstream().await;
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("data").join("prod_data.csv");
    let app = test_app(&server.uri(), &store);
    let url = page_url(&server, "Ferris");

    let (status, body) = send(
        app.clone(),
        "POST",
        "/summary",
        Some(json!({"url": url, "version": "v2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Ferris is Rust's crab.");
    let original = body["original"].as_str().unwrap().to_string();
    assert!(original.contains("Ferris is the unofficial mascot"));

    let (status, _) = send(
        app,
        "POST",
        "/feedback",
        Some(json!({"url": url, "summary": "Ferris is Rust's crab.", "rating": 5, "version": "v2"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let raw = std::fs::read_to_string(&store).unwrap();
    let mut lines = raw.lines();
    assert_eq!(lines.next(), Some("article,abstract,rating,version"));
    assert_eq!(
        lines.next(),
        Some(format!("{original},Ferris is Rust's crab.,5,v2").as_str())
    );
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_summary_of_unreachable_page() {
    let server = upstream().await;
    let dir = TempDir::new().unwrap();
    let app = test_app(&server.uri(), &dir.path().join("prod_data.csv"));

    let (status, body) = send(
        app,
        "POST",
        "/summary",
        Some(json!({"url": page_url(&server, "Missing")})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_health_and_versions() {
    let server = upstream().await;
    let dir = TempDir::new().unwrap();
    let app = test_app(&server.uri(), &dir.path().join("prod_data.csv"));

    let (status, body) = send(app.clone(), "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "OK", "versions": ["v1", "v2", "v3", "v4", "v5"]}));

    let (status, body) = send(app, "GET", "/versions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[1], json!({"version": "v2", "kind": "DistilBartBase", "model": "sshleifer/distilbart-cnn-12-6"}));
}

#[tokio::test]
async fn test_feedback_with_invalid_rating_writes_nothing() {
    let server = upstream().await;
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("prod_data.csv");
    let app = test_app(&server.uri(), &store);

    let (status, body) = send(
        app,
        "POST",
        "/feedback",
        Some(json!({"url": page_url(&server, "Ferris"), "summary": "x", "rating": 0, "version": "v1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Rating"));
    assert!(!store.exists());
}
