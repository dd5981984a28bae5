//! Route definitions for the `/unidades` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::unidade;
use crate::state::AppState;

/// Routes mounted at `/unidades`.
///
/// ```text
/// GET   /                     -> search (paginated)
/// POST  /                     -> create
/// GET   /lista                -> list (full, ordered by name)
/// GET   /{id}                 -> get_by_id
/// PATCH /{id}                 -> update
/// PUT   /{id}/desativar       -> deactivate
/// GET   /codigo/{codigo}      -> get_by_codigo
/// GET   /sigla/{sigla}        -> get_by_sigla
/// GET   /nome/{nome}          -> get_by_nome
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(unidade::search).post(unidade::create))
        .route("/lista", get(unidade::list))
        .route("/codigo/{codigo}", get(unidade::get_by_codigo))
        .route("/sigla/{sigla}", get(unidade::get_by_sigla))
        .route("/nome/{nome}", get(unidade::get_by_nome))
        .route("/{id}", get(unidade::get_by_id).patch(unidade::update))
        .route("/{id}/desativar", put(unidade::deactivate))
}
