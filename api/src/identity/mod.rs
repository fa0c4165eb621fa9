use axum::http::{header, request::Parts};

use crate::{App, error::AppError};

use self::models::identity::Identity;

pub mod models;
pub mod routes;

pub const COOKIE_NAME: &str = "auth_token";

#[derive(thiserror::Error, Debug)]
pub enum AuthenticationError {
    #[error("Not authorized to access this route, no `{COOKIE_NAME}` cookie or bearer token found.")]
    NoCredentials,

    #[error(
        "Unauthorized, please check if you're logged in. This could be due to \
         an expired session or token has became invalid."
    )]
    Unauthorized,
}

/// Session token from the `auth_token` cookie, falling back to an
/// `Authorization: Bearer` header.
fn session_token(parts: &Parts) -> Option<String> {
    let jar = axum_extra::extract::cookie::CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(COOKIE_NAME) {
        return Some(cookie.value().to_owned());
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

pub struct MaybeAuthUser(pub Result<Identity, AuthenticationError>);

impl axum::extract::FromRequestParts<App> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &App) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(parts) else {
            return Ok(MaybeAuthUser(Err(AuthenticationError::NoCredentials)));
        };

        let identity = state.store.identity_by_session(&token).await?;

        Ok(MaybeAuthUser(
            identity.ok_or(AuthenticationError::Unauthorized),
        ))
    }
}

/// Rejects the request with 401 before the handler body runs when no valid
/// session is attached.
pub struct AuthUser(pub Identity);

impl axum::extract::FromRequestParts<App> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &App) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(auth_user) = MaybeAuthUser::from_request_parts(parts, state).await?;

        Ok(AuthUser(auth_user?))
    }
}
