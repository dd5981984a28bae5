pub mod auth;
pub mod health;
pub mod relatorio;
pub mod unidade;

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                      login (public)
///
/// /unidades                        search (paginated), create
/// /unidades/lista                  full list ordered by name
/// /unidades/{id}                   get, patch
/// /unidades/{id}/desativar         deactivate (patch-and-confirm)
/// /unidades/codigo/{codigo}        lookup by code
/// /unidades/sigla/{sigla}          lookup by abbreviation
/// /unidades/nome/{nome}            lookup by name
///
/// /relatorio/quantitativo          monthly quantitative report
/// ```
///
/// Everything except `/auth/login` requires a bearer token, enforced
/// per handler by the `AuthUser` extractor.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/unidades", unidade::router())
        .nest("/relatorio", relatorio::router())
}

/// Assemble the whole application: the health probe, the `/api/v1`
/// tree, and the middleware stack (panic recovery, request timeout,
/// request ids, tracing, CORS). The binary and the integration tests
/// both go through here so they always run the same stack.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(health::router())
        .nest("/api/v1", api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Origins come from configuration; an unparseable origin aborts
/// startup rather than silently serving with a partial allow-list.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
