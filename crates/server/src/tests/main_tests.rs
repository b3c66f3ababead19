use super::*;
use axum::{
    body::{self, Body},
    http::{header, Method, Request},
};
use tower::ServiceExt;

const CATALOG: &str = r#"{
  "artworks": [
    {"id": 1, "image": "/img/hollywood-africans.jpg", "title": "Hollywood Africans", "year": "1983"},
    {"id": "warrior", "image": "/img/warrior.jpg", "title": "Warrior", "year": 1982}
  ],
  "edition": "spring"
}"#;

fn test_app(dir: &tempfile::TempDir, contents: Option<&str>) -> Router {
    let data_path = dir.path().join("data.json");
    if let Some(contents) = contents {
        std::fs::write(&data_path, contents).expect("write catalog");
    }
    let catalog = CatalogContext::new(data_path, "basquiat", config::DEFAULT_CACHE_CONTROL)
        .expect("context");
    build_router(Arc::new(AppState { catalog }))
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(&dir, None);
    let request = Request::get("/healthz").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn serves_catalog_verbatim_with_cors_and_cache_headers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(&dir, Some(CATALOG));

    let request = Request::get("/api/basquiat")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        api::ALLOWED_METHODS
    );
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        api::ALLOWED_HEADERS
    );
    assert_eq!(headers[header::CACHE_CONTROL], "max-age=0, s-maxage=1800");

    let body = body_json(response).await;
    let expected: serde_json::Value = serde_json::from_str(CATALOG).expect("fixture");
    assert_eq!(body, expected);
}

#[tokio::test]
async fn generic_route_serves_the_same_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(&dir, Some(CATALOG));

    let request = Request::get("/api/artworks")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["artworks"][1]["id"], "warrior");
}

#[tokio::test]
async fn missing_data_file_answers_500_with_failure_body() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(&dir, None);

    let request = Request::get("/api/basquiat")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());

    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({ "error": "Failed to read basquiat.json" })
    );
}

#[tokio::test]
async fn malformed_data_file_answers_500() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(&dir, Some("{\"artworks\": [ "));

    let request = Request::get("/api/basquiat")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn data_file_is_reread_on_every_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(&dir, Some(r#"{"artworks": []}"#));

    let first = app
        .clone()
        .oneshot(Request::get("/api/basquiat").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(body_json(first).await["artworks"], serde_json::json!([]));

    std::fs::write(dir.path().join("data.json"), CATALOG).expect("rewrite");
    let second = app
        .oneshot(Request::get("/api/basquiat").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(body_json(second).await["edition"], "spring");
}

#[tokio::test]
async fn preflight_answers_204_with_cors_headers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(&dir, Some(CATALOG));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/basquiat")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        api::ALLOWED_METHODS
    );
}

#[tokio::test]
async fn unknown_catalog_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(&dir, Some(CATALOG));

    let request = Request::get("/api/warhol")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "not_found");
}
