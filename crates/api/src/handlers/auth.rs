//! Handlers for the `/auth` resource (login).

use axum::extract::State;
use axum::Json;
use intake_core::error::CoreError;
use intake_db::models::usuario::UsuarioResponse;
use intake_db::repositories::UsuarioRepo;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The one message every credential failure returns. Unknown login,
/// disabled account, and wrong password are indistinguishable to the
/// caller, so responses cannot be used to enumerate accounts or probe
/// account status.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Successful authentication response: a single stateless bearer token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Credential verification
// ---------------------------------------------------------------------------

/// Verify a login/password pair against the account registry.
///
/// The password is only checked when an enabled account was found
/// (the hash comparison is the expensive step), but all failure paths
/// collapse into the same [`INVALID_CREDENTIALS`] error. Returns the
/// hash-stripped [`UsuarioResponse`], so the hash cannot travel past
/// this function.
pub async fn validate_user(
    pool: &PgPool,
    login: &str,
    password: &str,
) -> AppResult<UsuarioResponse> {
    let usuario = UsuarioRepo::find_by_login(pool, login).await?;

    let usuario = match usuario {
        Some(u) if u.status != 0 => u,
        _ => {
            return Err(AppError::Core(CoreError::Unauthorized(
                INVALID_CREDENTIALS.into(),
            )))
        }
    };

    let password_valid = verify_password(password, &usuario.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    Ok(usuario.into())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with login + password. Returns a bearer access token
/// whose claims carry only `{sub, nome, login}` (plus signer-added
/// expiry metadata).
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let usuario = validate_user(&state.pool, &input.login, &input.password).await?;

    let access_token = generate_access_token(&usuario, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = usuario.id, "login succeeded");

    Ok(Json(TokenResponse { access_token }))
}
