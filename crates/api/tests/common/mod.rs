//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` goes through `routes::build_app`, so the tests run
//! the exact middleware stack the binary serves.

#![allow(dead_code)] // not every test binary uses every helper

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use intake_api::auth::jwt::{generate_access_token, JwtConfig};
use intake_api::auth::password::hash_password;
use intake_api::config::ServerConfig;
use intake_api::routes;
use intake_api::state::AppState;
use intake_db::models::usuario::{CreateUsuario, Usuario, UsuarioResponse};
use intake_db::repositories::UsuarioRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    routes::build_app(AppState::new(pool, test_config()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request_auth(app, Method::POST, uri, body, token).await
}

/// Send a PATCH request with a JSON body and a bearer token.
pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request_auth(app, Method::PATCH, uri, body, token).await
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    json_request_auth(app, Method::PUT, uri, body, token).await
}

async fn json_request_auth(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body into a raw string.
pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a staff account directly in the database and return the row plus
/// the plaintext password used.
pub async fn create_test_user(pool: &PgPool, login: &str, status: i32) -> (Usuario, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUsuario {
        nome: format!("Test User {login}"),
        login: login.to_string(),
        email: format!("{login}@test.com"),
        password_hash: hashed,
        status,
        permissao: Some("DEFAULT".to_string()),
        cargo: None,
    };
    let usuario = UsuarioRepo::create(pool, &input)
        .await
        .expect("account creation should succeed");
    (usuario, password.to_string())
}

/// Mint a valid bearer token for the given account, bypassing the login
/// endpoint (for tests that only need an authenticated caller).
pub fn mint_token(usuario: &Usuario) -> String {
    let response = UsuarioResponse::from(usuario.clone());
    generate_access_token(&response, &test_config().jwt)
        .expect("token generation should succeed")
}
