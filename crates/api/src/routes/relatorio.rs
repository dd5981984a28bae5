//! Route definitions for the `/relatorio` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::relatorio;
use crate::state::AppState;

/// Routes mounted at `/relatorio`.
///
/// ```text
/// GET /quantitativo  -> monthly quantitative report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/quantitativo", get(relatorio::quantitativo))
}
