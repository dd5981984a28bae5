//! Organizational-unit entity model and DTOs.

use intake_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full unit row from the `unidades` table.
///
/// `nome`, `sigla`, and `codigo` are each globally unique across the
/// whole table (enforced by `uq_unidades_*` indexes); a deactivated
/// unit still blocks reuse of its identifiers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Unidade {
    pub id: DbId,
    pub nome: String,
    pub sigla: String,
    pub codigo: String,
    /// `1` = active, `0` = deactivated. Units are never hard-deleted.
    pub status: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a unit.
#[derive(Debug, Deserialize)]
pub struct CreateUnidade {
    pub nome: String,
    pub sigla: String,
    pub codigo: String,
    pub status: i32,
}

/// DTO for patching a unit. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUnidade {
    pub nome: Option<String>,
    pub sigla: Option<String>,
    pub codigo: Option<String>,
    pub status: Option<i32>,
}

/// Paginated search result envelope.
///
/// The zero-match case does not use this struct: it serializes as
/// `{total: 0, pagina: 0, limite: 0, users: []}` to keep the original
/// wire contract (see the search handler).
#[derive(Debug, Serialize)]
pub struct UnidadePage {
    pub total: i64,
    pub pagina: i64,
    pub limite: i64,
    pub data: Vec<Unidade>,
}
