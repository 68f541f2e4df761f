//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use shopkit_api::config::ServerConfig;
use shopkit_api::middleware::csrf;
use shopkit_api::router::build_app_router;
use shopkit_api::state::AppState;
use shopkit_core::i18n::Translator;
use shopkit_core::types::DbId;
use shopkit_db::facade::AvailabilityFacade;
use shopkit_db::models::availability::CreateAvailability;
use shopkit_db::models::product::CreateProduct;
use shopkit_db::repositories::{AvailabilityRepo, ProductRepo};

/// Secret every test app is configured with.
pub const TEST_CSRF_SECRET: &str = "test-csrf-secret";

/// Test configuration matching the defaults of `ServerConfig::from_env`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 5,
        csrf_secret: TEST_CSRF_SECRET.to_string(),
    }
}

/// Build the full application router against the given pool, with the same
/// middleware stack as the production binary.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        translator: Arc::new(Translator::new()),
    };
    build_app_router(state, &config)
}

/// A valid anti-forgery token for the test secret.
pub fn test_csrf_token() -> String {
    csrf::csrf_token(TEST_CSRF_SECRET)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST without an anti-forgery token.
pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST with a valid anti-forgery token.
pub async fn post_csrf(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(csrf::CSRF_TOKEN_HEADER, test_csrf_token())
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an urlencoded form with a valid anti-forgery token.
pub async fn post_form_csrf(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(csrf::CSRF_TOKEN_HEADER, test_csrf_token())
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn seed_availability(pool: &SqlitePool, name: &str) -> DbId {
    AvailabilityRepo::create(
        pool,
        &CreateAvailability {
            name: name.to_string(),
        },
    )
    .await
    .expect("failed to seed availability")
    .id
}

pub async fn seed_product(pool: &SqlitePool, name: &str, availability_id: DbId) -> DbId {
    ProductRepo::create(
        pool,
        &CreateProduct {
            name: name.to_string(),
            availability_id,
        },
    )
    .await
    .expect("failed to seed product")
    .id
}

pub async fn set_default(pool: &SqlitePool, id: DbId) {
    AvailabilityFacade::set_default_in_stock(pool, id)
        .await
        .expect("failed to set default availability");
}

pub async fn current_default(pool: &SqlitePool) -> Option<DbId> {
    AvailabilityFacade::default_in_stock(pool)
        .await
        .expect("failed to read default availability")
        .map(|availability| availability.id)
}
