//! Counting queries for the monthly quantitative report.
//!
//! Case-intake rows live in `admissibilidades`; this repository only
//! counts them within a date window. Row creation belongs to the
//! intake flows outside this service.

use intake_core::types::Timestamp;
use sqlx::PgPool;

/// Provides the report's aggregate queries.
pub struct RelatorioRepo;

impl RelatorioRepo {
    /// Count cases still under analysis: created in the window, status 1,
    /// no interlocutory decision yet.
    pub async fn count_em_analise(
        pool: &PgPool,
        inicio: Timestamp,
        fim: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM admissibilidades
             WHERE criado_em >= $1 AND criado_em <= $2
               AND status = 1
               AND data_decisao_interlocutoria IS NULL",
        )
        .bind(inicio)
        .bind(fim)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Names of the units with cases under analysis in the window.
    pub async fn unidades_em_analise(
        pool: &PgPool,
        inicio: Timestamp,
        fim: Timestamp,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT u.nome FROM admissibilidades a
             JOIN unidades u ON u.id = a.unidade_id
             WHERE a.criado_em >= $1 AND a.criado_em <= $2
               AND a.status = 1
               AND a.data_decisao_interlocutoria IS NULL
             ORDER BY u.nome ASC",
        )
        .bind(inicio)
        .bind(fim)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(nome,)| nome).collect())
    }

    /// Count cases ruled inadmissible in the window (status 2, no
    /// interlocutory decision).
    pub async fn count_inadmissiveis(
        pool: &PgPool,
        inicio: Timestamp,
        fim: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM admissibilidades
             WHERE criado_em >= $1 AND criado_em <= $2
               AND status = 2
               AND data_decisao_interlocutoria IS NULL",
        )
        .bind(inicio)
        .bind(fim)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Count cases admitted via an interlocutory decision dated inside
    /// the window (status 0).
    pub async fn count_admissiveis(
        pool: &PgPool,
        inicio: Timestamp,
        fim: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM admissibilidades
             WHERE data_decisao_interlocutoria >= $1
               AND data_decisao_interlocutoria <= $2
               AND status = 0",
        )
        .bind(inicio)
        .bind(fim)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
