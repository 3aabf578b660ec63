use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::{Value, json};
use urlc_domain::config::SerperConfig;
use urlc_search::{SearchBackend, SearchError, SearchQuery, SerperClient};

async fn search(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default().to_owned();

    if header("x-api-key") != "test-key" {
        return (StatusCode::FORBIDDEN, Json(json!({"message": "Unauthorized."})));
    }

    let page = body.get("page").cloned().unwrap_or(Value::Null);
    (
        StatusCode::OK,
        Json(json!({
            "searchParameters": body,
            "organic": [
                {
                    "link": format!("https://a.com/{page}"),
                    "title": format!("{}|{}|{}|{}", body["q"], body["gl"], body["hl"], body["num"]),
                    "snippet": header("accept-encoding"),
                },
                {"title": "no link"}
            ]
        })),
    )
}

async fn broken() -> &'static str {
    "<html>not json</html>"
}

async fn serve() -> String {
    let app = Router::new().route("/search", post(search)).route("/broken", post(broken));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });
    format!("http://{addr}")
}

fn client(key: &str, endpoint: String) -> SerperClient {
    let config = SerperConfig { endpoint, country: "us".into(), language: "en".into(), ..SerperConfig::default() };
    SerperClient::new(key, config).unwrap()
}

#[tokio::test]
async fn sends_key_locale_and_page() {
    let base = serve().await;
    let client = client("test-key", format!("{base}/search"));

    let results = client.search(&SearchQuery::new("site:a.com", 10).page(2)).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].link, "https://a.com/2");
    assert_eq!(results[0].title, r#""site:a.com"|"us"|"en"|10"#);
    assert_eq!(results[0].snippet, "identity");
    assert_eq!(results[1].link, "");

    let results = client.search(&SearchQuery::new("site:a.com", 10)).await.unwrap();
    assert_eq!(results[0].link, "https://a.com/null");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let base = serve().await;
    let client = client("wrong-key", format!("{base}/search"));

    let err = client.search(&SearchQuery::new("q", 10)).await.unwrap_err();
    match err {
        SearchError::Status { status, body, .. } => {
            assert_eq!(status, 403);
            assert!(body.contains("Unauthorized"));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let base = serve().await;
    let client = client("test-key", format!("{base}/broken"));

    let err = client.search(&SearchQuery::new("q", 10)).await.unwrap_err();
    assert!(matches!(err, SearchError::Decode { .. }));
    assert!(err.to_string().contains("decoding Serper response"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client("test-key", format!("http://{addr}/search"));
    let err = client.search(&SearchQuery::new("q", 10)).await.unwrap_err();
    assert!(matches!(err, SearchError::Transport { .. }));
}
