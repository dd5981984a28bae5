//! Handlers for the `/unidades` resource.
//!
//! Units carry three independently-unique identifiers (`nome`, `sigla`,
//! `codigo`). The same point lookup serves two call sites with opposite
//! polarity: the public fetch endpoints treat "absent" as `NotFound`,
//! while [`ensure_unique`] treats "present" as `Conflict`. Units are
//! never hard-deleted; deactivation is a status patch.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use intake_core::error::CoreError;
use intake_core::pagination::{clamp_limite, clamp_pagina, clamp_pagina_to_total, offset};
use intake_core::types::DbId;
use intake_db::models::unidade::{CreateUnidade, Unidade, UnidadePage, UpdateUnidade};
use intake_db::repositories::{UnidadeRepo, UniqueField};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::state::AppState;

/// Confirmation body returned by the deactivation endpoint.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Uniqueness guard
// ---------------------------------------------------------------------------

/// Probe every present identifier for a collision with a *different* row.
///
/// A match on `exclude_id` itself is fine -- re-submitting an unchanged
/// value during an update is not a conflict. All present fields are
/// probed (no short-circuit at the first hit) and every collision is
/// named in the resulting error, so the caller learns about all of them
/// in one round trip.
///
/// This is a user-friendly pre-check only: the `uq_unidades_*` indexes
/// remain the authoritative uniqueness mechanism under concurrency.
pub async fn ensure_unique(
    pool: &PgPool,
    candidates: &[(UniqueField, Option<&str>)],
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    let mut collisions = Vec::new();

    for &(field, value) in candidates {
        let Some(value) = value else { continue };

        let existing = UnidadeRepo::find_by_unique_field(pool, field, value).await?;
        if let Some(row) = existing {
            if exclude_id != Some(row.id) {
                collisions.push(format!(
                    "a unit with the same {} ({value}) already exists",
                    field.column()
                ));
            }
        }
    }

    if collisions.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Conflict(collisions.join("; "))))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/unidades
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateUnidade>,
) -> AppResult<(StatusCode, Json<Unidade>)> {
    ensure_unique(
        &state.pool,
        &[
            (UniqueField::Nome, Some(&input.nome)),
            (UniqueField::Sigla, Some(&input.sigla)),
            (UniqueField::Codigo, Some(&input.codigo)),
        ],
        None,
    )
    .await?;

    // A concurrent writer may win the race past the guard; the error
    // classifier turns the resulting uq_ violation into a 409.
    let unidade = UnidadeRepo::create(&state.pool, &input).await?;

    Ok((StatusCode::CREATED, Json(unidade)))
}

/// GET /api/v1/unidades
///
/// Paginated search. `busca` matches as a substring against nome, sigla,
/// and codigo; `filtro` filters on status unless it is `-1`. A search
/// with zero matches returns the all-zero envelope
/// `{total: 0, pagina: 0, limite: 0, users: []}` so callers can tell
/// "nothing matched" apart from a valid empty page.
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Response> {
    let mut pagina = clamp_pagina(params.pagina);
    let limite = clamp_limite(params.limite);

    let busca = params.busca.as_deref().filter(|s| !s.is_empty());
    // -1 is the sentinel for "no status filter".
    let status = params.filtro.filter(|&f| f != -1);

    let total = UnidadeRepo::count_search(&state.pool, busca, status).await?;
    if total == 0 {
        let body = json!({ "total": 0, "pagina": 0, "limite": 0, "users": [] });
        return Ok(Json(body).into_response());
    }

    pagina = clamp_pagina_to_total(pagina, limite, total);

    let data = UnidadeRepo::search(
        &state.pool,
        busca,
        status,
        limite,
        offset(pagina, limite),
    )
    .await?;

    Ok(Json(UnidadePage {
        total,
        pagina,
        limite,
        data,
    })
    .into_response())
}

/// GET /api/v1/unidades/lista
///
/// Full unpaginated list ordered by name, for dropdowns and the like.
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Unidade>>> {
    let unidades = UnidadeRepo::list_all(&state.pool).await?;
    if unidades.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Unidade",
            detail: "no units registered".to_string(),
        }));
    }
    Ok(Json(unidades))
}

/// GET /api/v1/unidades/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Unidade>> {
    let unidade = UnidadeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Unidade",
            detail: format!("no record with id {id}"),
        }))?;
    Ok(Json(unidade))
}

/// GET /api/v1/unidades/codigo/{codigo}
pub async fn get_by_codigo(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(codigo): Path<String>,
) -> AppResult<Json<Unidade>> {
    fetch_by_field(&state, UniqueField::Codigo, &codigo).await
}

/// GET /api/v1/unidades/sigla/{sigla}
pub async fn get_by_sigla(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(sigla): Path<String>,
) -> AppResult<Json<Unidade>> {
    fetch_by_field(&state, UniqueField::Sigla, &sigla).await
}

/// GET /api/v1/unidades/nome/{nome}
pub async fn get_by_nome(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(nome): Path<String>,
) -> AppResult<Json<Unidade>> {
    fetch_by_field(&state, UniqueField::Nome, &nome).await
}

/// PATCH /api/v1/unidades/{id}
///
/// Applies a partial update. Each identifier present in the patch is
/// probed for a collision with a different row; resubmitting the
/// current value is allowed.
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUnidade>,
) -> AppResult<Json<Unidade>> {
    // Load first so a bad id fails with NotFound, not Conflict.
    let _existing = UnidadeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Unidade",
            detail: format!("no record with id {id}"),
        }))?;

    ensure_unique(
        &state.pool,
        &[
            (UniqueField::Nome, input.nome.as_deref()),
            (UniqueField::Sigla, input.sigla.as_deref()),
            (UniqueField::Codigo, input.codigo.as_deref()),
        ],
        Some(id),
    )
    .await?;

    let unidade = UnidadeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::InternalError("could not update the unit, please retry".to_string())
        })?;

    Ok(Json(unidade))
}

/// PUT /api/v1/unidades/{id}/desativar
///
/// Applies the supplied patch (typically `{"status": 0}`) and returns a
/// confirmation message. Deliberately a generic patch-and-confirm
/// operation rather than an enforced state transition, and idempotent:
/// deactivating an already-inactive unit succeeds with the same message.
pub async fn deactivate(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUnidade>,
) -> AppResult<Json<MessageResponse>> {
    let _existing = UnidadeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Unidade",
            detail: format!("no record with id {id}"),
        }))?;

    UnidadeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::InternalError("could not deactivate the unit, please retry".to_string())
        })?;

    Ok(Json(MessageResponse {
        message: "Unit deactivated successfully.".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn fetch_by_field(
    state: &AppState,
    field: UniqueField,
    value: &str,
) -> AppResult<Json<Unidade>> {
    let unidade = UnidadeRepo::find_by_unique_field(&state.pool, field, value)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Unidade",
            detail: format!("no record with {} '{value}'", field.column()),
        }))?;
    Ok(Json(unidade))
}
