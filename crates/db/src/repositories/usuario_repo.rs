//! Repository for the `usuarios` table.
//!
//! Accounts are created and mutated by flows outside this service
//! (registration, password reset); here they are read for credential
//! verification. `create` exists for seeding and tests.

use sqlx::PgPool;

use crate::models::usuario::{CreateUsuario, Usuario};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, nome, login, email, password_hash, status, permissao, cargo, created_at, updated_at";

/// Provides lookups for staff accounts.
pub struct UsuarioRepo;

impl UsuarioRepo {
    /// Insert a new account, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUsuario) -> Result<Usuario, sqlx::Error> {
        let query = format!(
            "INSERT INTO usuarios (nome, login, email, password_hash, status, permissao, cargo)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Usuario>(&query)
            .bind(&input.nome)
            .bind(&input.login)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.status)
            .bind(&input.permissao)
            .bind(&input.cargo)
            .fetch_one(pool)
            .await
    }

    /// Find an account by login (case-sensitive exact match).
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuarios WHERE login = $1");
        sqlx::query_as::<_, Usuario>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }
}
