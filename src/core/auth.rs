//! Autenticazione - Verifica del token di sessione emesso dall'identity provider
//!
//! Il token (JWT HS256, firmato con il secret condiviso) può arrivare
//! nell'header `Authorization: Bearer <token>` oppure in uno dei cookie di sessione
//! di NextAuth. L'identità verificata viene inserita nelle Extension della richiesta
//! come `AuthenticatedUser` e gli handler la ricevono come parametro esplicito.

use crate::core::{AppError, AppState};
use axum::extract::State;
use axum::{Error, body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Cookie di sessione cercati, in ordine di priorità
pub const SESSION_COOKIES: [&str; 4] = [
    "__Secure-authjs.session-token",
    "authjs.session-token",
    "__Secure-next-auth.session-token",
    "next-auth.session-token",
];

pub const DEV_TOKEN: &str = "dev-token";
pub const DEV_USER_ID: &str = "dev-user-id";

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // id utente dell'identity provider
    pub exp: usize,  // Expiry time of the token
    #[serde(default)]
    pub iat: usize, // Issued at time of the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Identità del chiamante, disponibile dopo `authentication_middleware`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl AuthenticatedUser {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[instrument(skip(secret), fields(user_id = %user_id))]
pub fn encode_jwt(user_id: &str, secret: &str) -> Result<String, Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(24);
    let claim = Claims {
        sub: user_id.to_string(),
        exp: (now + expire).timestamp() as usize,
        iat: now.timestamp() as usize,
        name: None,
        email: None,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        Error::new("Error in encoding jwt token")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, Error> {
    debug!("Decoding JWT token");
    // HS256 con verifica di exp (Validation::default)
    decode(
        jwt_token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        Error::new("Error in decoding jwt token")
    })
}

/// Estrae il token dall'header Authorization (Bearer) o, in mancanza, dai cookie di sessione
pub fn extract_token(headers: &http::HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        let mut parts = value.split_whitespace();
        if let (Some(scheme), Some(token)) = (parts.next(), parts.next()) {
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    let cookies: Vec<(&str, &str)> = headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .collect();

    SESSION_COOKIES.iter().find_map(|name| {
        cookies
            .iter()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.to_string())
    })
}

/// Risolve il token in un'identità verificata
pub fn resolve_identity(token: &str, state: &AppState) -> Result<AuthenticatedUser, AppError> {
    if state.allow_dev_token && token == DEV_TOKEN {
        warn!("Using development token bypass");
        return Ok(AuthenticatedUser::new(DEV_USER_ID));
    }

    let token_data = decode_jwt(token, &state.jwt_secret)
        .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

    if token_data.claims.sub.trim().is_empty() {
        warn!("Token without subject");
        return Err(AppError::unauthorized("Invalid token claims"));
    }

    Ok(AuthenticatedUser::new(token_data.claims.sub))
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = extract_token(req.headers()).ok_or_else(|| {
        warn!("Missing session token");
        AppError::unauthorized("Missing authentication token")
    })?;

    let current_user = resolve_identity(&token, &state)?;
    info!("User authenticated: {}", current_user.user_id);

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn test_bearer_token_is_preferred() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("next-auth.session-token=cookie"),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_session_cookie_priority() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static(
                "theme=dark; next-auth.session-token=old; authjs.session-token=new",
            ),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("new"));
    }

    #[test]
    fn test_missing_token() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_jwt_roundtrip_keeps_subject() {
        let token = encode_jwt("user-a", "secret").unwrap();
        let data = decode_jwt(&token, "secret").unwrap();
        assert_eq!(data.claims.sub, "user-a");
        assert!(decode_jwt(&token, "other-secret").is_err());
    }
}
