//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the paginated unit search
/// (`?pagina=&limite=&busca=&filtro=`).
///
/// `pagina` is 1-based. `filtro` filters on unit status; `-1` is the
/// sentinel for "no status filter". Values are normalized in the
/// handler via `intake_core::pagination`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub pagina: Option<i64>,
    pub limite: Option<i64>,
    pub busca: Option<String>,
    pub filtro: Option<i32>,
}
