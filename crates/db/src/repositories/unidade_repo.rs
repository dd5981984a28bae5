//! Repository for the `unidades` table.
//!
//! `nome`, `sigla`, and `codigo` each carry a `uq_unidades_*` unique
//! index. The handler-level uniqueness guard is a friendly pre-check;
//! the index is the authoritative signal under concurrent writers (a
//! violation surfaces as a 23505 error and is mapped to a conflict by
//! the API layer).

use intake_core::types::DbId;
use sqlx::PgPool;

use crate::models::unidade::{CreateUnidade, Unidade, UpdateUnidade};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nome, sigla, codigo, status, created_at, updated_at";

/// The three independently-unique identifier columns of a unit.
///
/// One shared point-lookup primitive serves both the public
/// fetch-or-not-found wrappers and the internal uniqueness probe,
/// where "found" means conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Nome,
    Sigla,
    Codigo,
}

impl UniqueField {
    /// Column name, used both in SQL and in user-facing error messages.
    pub fn column(self) -> &'static str {
        match self {
            UniqueField::Nome => "nome",
            UniqueField::Sigla => "sigla",
            UniqueField::Codigo => "codigo",
        }
    }
}

/// Escape LIKE metacharacters so search input matches literally.
///
/// Without this, `busca = "_"` would match every row and `"10%"`
/// anything containing "10". Pairs with `ESCAPE '\'` in the queries.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Provides CRUD operations for organizational units.
pub struct UnidadeRepo;

impl UnidadeRepo {
    /// Insert a new unit, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUnidade) -> Result<Unidade, sqlx::Error> {
        let query = format!(
            "INSERT INTO unidades (nome, sigla, codigo, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unidade>(&query)
            .bind(&input.nome)
            .bind(&input.sigla)
            .bind(&input.codigo)
            .bind(input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a unit by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Unidade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM unidades WHERE id = $1");
        sqlx::query_as::<_, Unidade>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Point lookup by one of the unique identifier columns
    /// (case-sensitive exact match).
    pub async fn find_by_unique_field(
        pool: &PgPool,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<Unidade>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unidades WHERE {} = $1",
            field.column()
        );
        sqlx::query_as::<_, Unidade>(&query)
            .bind(value)
            .fetch_optional(pool)
            .await
    }

    /// List every unit ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Unidade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM unidades ORDER BY nome ASC, id ASC");
        sqlx::query_as::<_, Unidade>(&query).fetch_all(pool).await
    }

    /// Count units matching the search filter.
    ///
    /// `busca` matches as a literal substring against nome, sigla, and
    /// codigo; `status` is an exact match when present. Both this and
    /// [`Self::search`] use the identical filter so the reported total
    /// always agrees with the page contents.
    pub async fn count_search(
        pool: &PgPool,
        busca: Option<&str>,
        status: Option<i32>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM unidades
             WHERE ($1::text IS NULL
                    OR nome LIKE '%' || $1 || '%' ESCAPE '\\'
                    OR sigla LIKE '%' || $1 || '%' ESCAPE '\\'
                    OR codigo LIKE '%' || $1 || '%' ESCAPE '\\')
               AND ($2::int IS NULL OR status = $2)",
        )
        .bind(busca.map(escape_like))
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Fetch one page of units matching the search filter, ordered by
    /// `nome ASC, id ASC` so repeated calls paginate deterministically.
    pub async fn search(
        pool: &PgPool,
        busca: Option<&str>,
        status: Option<i32>,
        limite: i64,
        offset: i64,
    ) -> Result<Vec<Unidade>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unidades
             WHERE ($1::text IS NULL
                    OR nome LIKE '%' || $1 || '%' ESCAPE '\\'
                    OR sigla LIKE '%' || $1 || '%' ESCAPE '\\'
                    OR codigo LIKE '%' || $1 || '%' ESCAPE '\\')
               AND ($2::int IS NULL OR status = $2)
             ORDER BY nome ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Unidade>(&query)
            .bind(busca.map(escape_like))
            .bind(status)
            .bind(limite)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Patch a unit. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUnidade,
    ) -> Result<Option<Unidade>, sqlx::Error> {
        let query = format!(
            "UPDATE unidades SET
                nome = COALESCE($2, nome),
                sigla = COALESCE($3, sigla),
                codigo = COALESCE($4, codigo),
                status = COALESCE($5, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unidade>(&query)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.sigla)
            .bind(&input.codigo)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }
}
