//! Router-level checks that never reach the database.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use foodgram_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use foodgram_recipes::infra::image::FsImageStore;
use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;

fn app() -> Router {
    build_router(AppState {
        db: DatabaseConnection::Disconnected,
        images: FsImageStore::new(std::env::temp_dir(), "/media/"),
    })
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn anonymous(method: Method, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap()
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_live_but_not_ready_without_database() {
    let (status, _) = send(anonymous(Method::GET, "/healthz", Body::empty())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(anonymous(Method::GET, "/readyz", Body::empty())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

// ── Authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_anonymous_writes_with_json_401() {
    let cases = [
        (Method::POST, "/api/recipes", Body::from("{}")),
        (Method::PATCH, "/api/recipes/1", Body::from("{}")),
        (Method::DELETE, "/api/recipes/1", Body::empty()),
        (Method::POST, "/api/recipes/1/favorite", Body::empty()),
        (Method::DELETE, "/api/recipes/1/shopping_cart", Body::empty()),
        (
            Method::GET,
            "/api/recipes/download_shopping_cart",
            Body::empty(),
        ),
    ];
    for (method, uri, body) in cases {
        let (status, body) = send(anonymous(method.clone(), uri, body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["kind"], "UNAUTHORIZED", "{method} {uri}");
    }
}

// ── Request validation ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_malformed_recipe_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/recipes")
        .header("content-type", "application/json")
        .header(USER_ID_HEADER, Uuid::new_v4().to_string())
        .header(USER_ROLE_HEADER, "0")
        .body(Body::from(r#"{"tags": "not a list"}"#))
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"]["body"].is_array());
}

#[tokio::test]
async fn should_reject_malformed_list_query() {
    let (status, body) = send(anonymous(
        Method::GET,
        "/api/recipes?author=not-a-uuid",
        Body::empty(),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"]["query"].is_array());
}
