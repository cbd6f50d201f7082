//! Session/Identity Gate.
//!
//! Session tokens are issued and signed by the external identity provider,
//! which also records `session:{token}` → user id in Redis. This module only
//! resolves a presented token to the stored user profile; anything it cannot
//! resolve is rejected with 401.

pub mod handlers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use redis::{aio::MultiplexedConnection, AsyncCommands};
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::store::{StoreError, UserStore};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` for unknown or expired tokens and for sessions whose user
    /// has no profile record.
    async fn resolve(&self, token: &str) -> Result<Option<User>, SessionError>;
}

pub struct RedisSessionResolver {
    conn: MultiplexedConnection,
    users: Arc<dyn UserStore>,
}

impl RedisSessionResolver {
    pub async fn connect(
        client: &redis::Client,
        users: Arc<dyn UserStore>,
    ) -> Result<Self, SessionError> {
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn, users })
    }
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

#[async_trait]
impl SessionResolver for RedisSessionResolver {
    async fn resolve(&self, token: &str) -> Result<Option<User>, SessionError> {
        let mut conn = self.conn.clone();
        let user_id: Option<String> = conn.get(session_key(token)).await?;

        let Some(user_id) = user_id else {
            debug!("Session token not found or expired");
            return Ok(None);
        };

        Ok(self.users.get(&user_id).await?)
    }
}

/// Reads the session token from the `session` cookie, falling back to an
/// `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string());

    from_cookie
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_string())
        })
        .filter(|token| !token.is_empty())
}

/// The authenticated caller. Extracting it rejects the request with 401 when
/// no valid session is presented.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(AppError::Unauthorized)?;

        let user = state
            .sessions
            .resolve(&token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}
