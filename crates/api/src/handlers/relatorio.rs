//! Handlers for the `/relatorio` resource (monthly quantitative report).

use axum::extract::State;
use axum::Json;
use chrono::{Datelike, TimeZone, Utc};
use intake_db::repositories::RelatorioRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Aggregate counts for the current calendar month.
#[derive(Debug, Serialize)]
pub struct RelatorioQuantitativo {
    pub total: i64,
    pub analise: i64,
    pub inadmissiveis: i64,
    pub admissiveis: i64,
    /// Generation date as `dd/mm/yyyy`.
    pub data_gerado: String,
    /// Names of the units with cases still under analysis.
    pub unidades: Vec<String>,
}

/// GET /api/v1/relatorio/quantitativo
///
/// Counts cases under analysis, inadmissible, and admitted within the
/// current calendar month. Pure counting queries, no mutation.
pub async fn quantitativo(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<RelatorioQuantitativo>> {
    let now = Utc::now();

    let inicio = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InternalError("invalid month start".to_string()))?;

    // First instant of the next month; the window is [inicio, fim).
    let (next_year, next_month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let fim = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InternalError("invalid month end".to_string()))?
        - chrono::Duration::nanoseconds(1);

    let analise = RelatorioRepo::count_em_analise(&state.pool, inicio, fim).await?;
    let unidades = RelatorioRepo::unidades_em_analise(&state.pool, inicio, fim).await?;
    let inadmissiveis = RelatorioRepo::count_inadmissiveis(&state.pool, inicio, fim).await?;
    let admissiveis = RelatorioRepo::count_admissiveis(&state.pool, inicio, fim).await?;

    Ok(Json(RelatorioQuantitativo {
        total: analise + inadmissiveis + admissiveis,
        analise,
        inadmissiveis,
        admissiveis,
        data_gerado: now.format("%d/%m/%Y").to_string(),
        unidades,
    }))
}
