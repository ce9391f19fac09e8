//! Extract the caller from the `Authorization: Bearer <token>` header.

use crate::auth::{verify_token, Claims};
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};

pub const AUTHORIZATION_HEADER: &str = "authorization";

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .and_then(|s| s.strip_prefix("Bearer ").or_else(|| s.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Caller identity when a valid token was sent. A missing or invalid token is anonymous.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<Claims>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(CurrentUser(None));
        };
        match verify_token(token, &state.secret_key) {
            Ok(claims) => Ok(CurrentUser(Some(claims))),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring bearer token");
                Ok(CurrentUser(None))
            }
        }
    }
}

/// Caller with `isAdmin`; rejects everyone else with 401.
#[derive(Clone, Debug)]
pub struct AdminUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state)
            .await
            .unwrap_or(CurrentUser(None));
        match user {
            Some(claims) if claims.is_admin => Ok(AdminUser(claims)),
            _ => Err(AppError::unauthorized()),
        }
    }
}
