use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use flate2::{Compression, write::GzEncoder};
use serde_json::json;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`
use url::Url;

use feedfinder::api::{self, models::DiscoverResponse, state::AppState};
use feedfinder::config::{ByteSize, Config, FetchConfig};
use feedfinder::discovery::{
    DiscoveryError, FetchError, HttpPageSource, PageSource, RawPage, fetch_page,
};

const BLOGSPOT_PAGE: &str = r#"
      <!doctype html>
      <html lang="en">
        <head>
          <link rel="alternate" type="application/atom+xml" href="https://test321.blogspot.com/feeds/posts/default/-/open-source"/>
          <link rel="alternate" type="application/rss+xml" href="https://test321.blogspot.com/feeds/posts/default/-/open-source?alt=rss"/>
        </head>
        <body></body>
      </html>
    "#;

const EMPTY_PAGE: &str = r#"
      <html>
        <head></head>
        <body></body>
      </html>
    "#;

/// Creates a minimal config for testing
fn create_test_config() -> Config {
    let config_toml = r#"
[server]
bind_addr = "127.0.0.1:0"
max_request_bytes = "1KB"

[fetch]
connect_timeout_secs = 2
request_timeout_secs = 5
    "#;

    toml::from_str(config_toml).expect("Failed to parse test config")
}

/// Page source that answers every GET with the same page
struct StubSource {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: &'static str,
}

#[async_trait]
impl PageSource for StubSource {
    async fn get(&self, url: &Url) -> Result<RawPage, FetchError> {
        Ok(RawPage {
            url: url.clone(),
            status: self.status,
            content_type: self.content_type.map(str::to_owned),
            body: self.body.to_string(),
        })
    }
}

/// Page source that always fails at the transport level
struct UnreachableSource;

#[async_trait]
impl PageSource for UnreachableSource {
    async fn get(&self, _url: &Url) -> Result<RawPage, FetchError> {
        Err(FetchError::Timeout)
    }
}

fn stub_app(body: &'static str) -> Router {
    let source = StubSource {
        status: StatusCode::OK,
        content_type: Some("text/html"),
        body,
    };
    api::router(AppState::new(create_test_config(), Arc::new(source)))
}

/// Router backed by the real HTTP page source
fn http_app() -> Router {
    api::router(AppState::from_config(create_test_config()).expect("Failed to build HTTP source"))
}

/// Starts a blog server on a random local port
async fn start_mock_blog() -> String {
    let app = Router::new()
        .route(
            "/",
            get(|| async { ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], BLOGSPOT_PAGE) }),
        )
        .route(
            "/empty",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], EMPTY_PAGE) }),
        )
        .route(
            "/xml",
            get(|| async { ([(header::CONTENT_TYPE, "text/xml")], "<rss></rss>") }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "gone").into_response() }),
        )
        .route(
            "/pdf",
            get(|| async { ([(header::CONTENT_TYPE, "application/pdf")], "%".repeat(6 * 1024 * 1024)) }),
        )
        .route(
            "/huge",
            get(|| async { ([(header::CONTENT_TYPE, "text/html")], "a".repeat(6 * 1024 * 1024)) }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let bound_addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", bound_addr)
}

/// Helper to build a POST / request
fn post_discover(payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri("/")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_discover_blogspot_feeds() {
    let app = stub_app(BLOGSPOT_PAGE);

    let response = app
        .oneshot(post_discover(json!({ "blogUrl": "https://test321.blogspot.com/" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let discovered: DiscoverResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(
        discovered.feed_urls,
        vec![
            "https://test321.blogspot.com/feeds/posts/default/-/open-source",
            "https://test321.blogspot.com/feeds/posts/default/-/open-source?alt=rss",
        ]
    );
}

#[tokio::test]
async fn test_invalid_url_format() {
    for blog_url in [json!("invalidLink.com"), json!(""), json!(42), json!(null)] {
        let app = stub_app(BLOGSPOT_PAGE);

        let response = app
            .oneshot(post_discover(json!({ "blogUrl": blog_url })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            "<h1>400 Error</h1><p>Invalid Blog URL</p>"
        );
    }
}

#[tokio::test]
async fn test_missing_blog_url() {
    let app = stub_app(BLOGSPOT_PAGE);

    let response = app.oneshot(post_discover(json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "<h1>400 Error</h1><p>Invalid Blog URL</p>"
    );
}

#[tokio::test]
async fn test_non_json_body_treated_as_empty() {
    let app = stub_app(BLOGSPOT_PAGE);

    let request = Request::builder()
        .uri("/")
        .method("POST")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("blogUrl=https://test321.blogspot.com/"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "<h1>400 Error</h1><p>Invalid Blog URL</p>"
    );
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = stub_app(BLOGSPOT_PAGE);

    let request = Request::builder()
        .uri("/")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"blogUrl\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "<h1>400 Error</h1><p>Invalid request body</p>"
    );
}

#[tokio::test]
async fn test_oversized_request_body() {
    let app = stub_app(BLOGSPOT_PAGE);

    let padding = "x".repeat(2048);
    let response = app
        .oneshot(post_discover(
            json!({ "blogUrl": "https://test321.blogspot.com/", "padding": padding }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_no_feed_discovered() {
    let app = stub_app(EMPTY_PAGE);

    let response = app
        .oneshot(post_discover(json!({ "blogUrl": "https://LinkWithNoFeedUrls.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        "<h1>404 Error</h1><p>No Feed Url Discovered</p>"
    );
}

#[tokio::test]
async fn test_unreachable_page() {
    let app = api::router(AppState::new(create_test_config(), Arc::new(UnreachableSource)));

    let response = app
        .oneshot(post_discover(json!({ "blogUrl": "https://notExistBlogPage.com/" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "<h1>400 Error</h1><p>Could not retrieve the blog page</p>"
    );
}

#[tokio::test]
async fn test_http_source_success() {
    let base = start_mock_blog().await;

    let response = http_app()
        .oneshot(post_discover(json!({ "blogUrl": format!("{base}/") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let discovered: DiscoverResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(discovered.feed_urls.len(), 2);
    assert!(discovered.feed_urls[0].ends_with("/-/open-source"));
    assert!(discovered.feed_urls[1].ends_with("?alt=rss"));
}

#[tokio::test]
async fn test_http_source_non_ok_status() {
    let base = start_mock_blog().await;

    let response = http_app()
        .oneshot(post_discover(json!({ "blogUrl": format!("{base}/missing") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_http_source_non_html_content_type() {
    let base = start_mock_blog().await;

    let response = http_app()
        .oneshot(post_discover(json!({ "blogUrl": format!("{base}/xml") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "<h1>400 Error</h1><p>Blog page is not an HTML document</p>"
    );
}

#[tokio::test]
async fn test_http_source_no_feeds() {
    let base = start_mock_blog().await;

    let response = http_app()
        .oneshot(post_discover(json!({ "blogUrl": format!("{base}/empty") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_http_source_page_too_large() {
    let base = start_mock_blog().await;

    let response = http_app()
        .oneshot(post_discover(json!({ "blogUrl": format!("{base}/huge") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_counters() {
    let app = stub_app(BLOGSPOT_PAGE);

    let response = app
        .clone()
        .oneshot(post_discover(json!({ "blogUrl": "https://test321.blogspot.com/" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri("/health")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(health["status"], "healthy");
    assert_eq!(health["metrics"]["requests"], 1);
    assert_eq!(health["metrics"]["succeeded"], 1);
    assert_eq!(health["metrics"]["feeds_found"], 2);
}

#[tokio::test]
async fn test_http_source_large_non_html_page() {
    let base = start_mock_blog().await;

    let response = http_app()
        .oneshot(post_discover(json!({ "blogUrl": format!("{base}/pdf") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "<h1>400 Error</h1><p>Blog page is not an HTML document</p>"
    );
}

#[tokio::test]
async fn test_non_html_page_is_not_downloaded() {
    let base = start_mock_blog().await;
    let config = FetchConfig {
        max_page_bytes: ByteSize(1024),
        ..FetchConfig::default()
    };
    let source = HttpPageSource::new(&config).unwrap();
    let url = Url::parse(&format!("{base}/pdf")).unwrap();

    let page = source.get(&url).await.unwrap();
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.is_empty());

    let err = fetch_page(&source, &url).await.unwrap_err();
    assert_eq!(err, DiscoveryError::NonHtmlContentType);
}

#[tokio::test]
async fn test_gzip_request_body() {
    let app = stub_app(BLOGSPOT_PAGE);

    let payload = serde_json::to_vec(&json!({ "blogUrl": "https://test321.blogspot.com/" })).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&payload).unwrap();
    let compressed = encoder.finish().unwrap();

    let request = Request::builder()
        .uri("/")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_ENCODING, "gzip")
        .body(Body::from(compressed))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let discovered: DiscoverResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        discovered.feed_urls,
        vec![
            "https://test321.blogspot.com/feeds/posts/default/-/open-source",
            "https://test321.blogspot.com/feeds/posts/default/-/open-source?alt=rss",
        ]
    );
}
