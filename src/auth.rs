use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, query::AuthUserRow, routes::AppState};

const TOKEN_SCHEME: &str = "Token";

/// Authenticated requester, resolved from an `Authorization: Token <key>` header.
pub struct AuthUser(pub AuthUserRow);

fn token_key(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.split_once(' ')?;
    let key = key.trim();

    (scheme == TOKEN_SCHEME && !key.is_empty()).then_some(key)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = token_key(parts).ok_or(AppError::Unauthorized)?;

        let Some(user) = state.query.find_user_by_token(key).await? else {
            return Err(AppError::Unauthorized);
        };

        Ok(AuthUser(user))
    }
}
