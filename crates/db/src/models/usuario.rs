//! Staff account entity model and DTOs.

use intake_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full staff account row from the `usuarios` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UsuarioResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: DbId,
    pub nome: String,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    /// Account gate: `0` means disabled and the account cannot log in.
    pub status: i32,
    pub permissao: Option<String>,
    pub cargo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioResponse {
    pub id: DbId,
    pub nome: String,
    pub login: String,
    pub email: String,
    pub status: i32,
    pub permissao: Option<String>,
    pub cargo: Option<String>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            nome: u.nome,
            login: u.login,
            email: u.email,
            status: u.status,
            permissao: u.permissao,
            cargo: u.cargo,
        }
    }
}

/// DTO for inserting a staff account (registration lives elsewhere;
/// this is used by seeding and tests).
#[derive(Debug, Deserialize)]
pub struct CreateUsuario {
    pub nome: String,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    pub status: i32,
    pub permissao: Option<String>,
    pub cargo: Option<String>,
}
