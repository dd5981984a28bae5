//! JWT access-token generation and validation.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! The claim set is deliberately minimal: subject id, display name, and
//! login. Permission and role data stay out of the token, and the
//! password hash never gets anywhere near it.

use intake_core::types::DbId;
use intake_db::models::usuario::UsuarioResponse;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account's internal database id.
    pub sub: DbId,
    /// The account's display name.
    pub nome: String,
    /// The login the account authenticated with.
    pub login: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for revocation / audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
///
/// Loaded once at startup and injected through [`crate::config::ServerConfig`];
/// never read from ambient globals after that.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Read the JWT configuration from the environment.
    ///
    /// `JWT_SECRET` is required; `JWT_ACCESS_EXPIRY_MINS` defaults to
    /// 60 minutes.
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty, or when the expiry
    /// does not parse. There is no safe fallback for a signing secret.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw.parse().expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64"),
            Err(_) => DEFAULT_ACCESS_EXPIRY_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

/// Generate an HS256 access token for an already-authenticated account.
///
/// No validation happens here -- the caller guarantees the account
/// passed credential verification. Takes the hash-stripped
/// [`UsuarioResponse`], so no code path can hand the signer a password
/// hash by accident.
pub fn generate_access_token(
    usuario: &UsuarioResponse,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: usuario.id,
        nome: usuario.nome.clone(),
        login: usuario.login.clone(),
        exp: issued_at + config.access_token_expiry_mins * 60,
        iat: issued_at,
        jti: Uuid::new_v4().to_string(),
    };

    // Header::default() is HS256.
    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Validate an access token's signature and expiry, returning its
/// [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::default()).map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use jsonwebtoken::errors::ErrorKind;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        }
    }

    fn test_usuario() -> UsuarioResponse {
        UsuarioResponse {
            id: 42,
            nome: "Maria da Silva".to_string(),
            login: "maria.silva".to_string(),
            email: "maria@example.com".to_string(),
            status: 1,
            permissao: Some("ADMIN".to_string()),
            cargo: Some("ANALISTA".to_string()),
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token = generate_access_token(&test_usuario(), &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.nome, "Maria da Silva");
        assert_eq!(claims.login, "maria.silva");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_claims_never_carry_sensitive_fields() {
        let config = test_config();
        let token = generate_access_token(&test_usuario(), &config)
            .expect("token generation should succeed");

        // Decode the payload as raw JSON to see the full claim set.
        let payload: serde_json::Value = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::default(),
        )
        .expect("token must decode")
        .claims;

        let keys: Vec<&str> = payload
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 6, "claims are exactly sub/nome/login/exp/iat/jti");
        for key in ["sub", "nome", "login", "exp", "iat", "jti"] {
            assert!(keys.contains(&key), "missing claim {key}");
        }
        assert!(payload.get("password_hash").is_none());
        assert!(payload.get("permissao").is_none());
        assert!(payload.get("cargo").is_none());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            nome: "x".to_string(),
            login: "x".to_string(),
            exp: now - 300, // expired 5 minutes ago (well past leeway)
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_token(&token, &config).map_err(|e| e.into_kind());
        assert_matches!(result, Err(ErrorKind::ExpiredSignature));
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            access_token_expiry_mins: 60,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            access_token_expiry_mins: 60,
        };

        let token = generate_access_token(&test_usuario(), &config_a)
            .expect("token generation should succeed");

        let result = validate_token(&token, &config_b).map_err(|e| e.into_kind());
        assert_matches!(result, Err(ErrorKind::InvalidSignature));
    }
}
