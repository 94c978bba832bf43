//! API key authentication.
//!
//! Callers put a shared key in the `Authorization` header, either the raw
//! key or its lowercase hex SHA-256 digest:
//!
//! ```text
//! Authorization: key1
//! Authorization: 81740996...  (sha256("key1"), hex)
//! ```
//!
//! The check is a route layer, so unknown paths fall through to the 404
//! fallback without needing a key.

use std::collections::HashSet;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Hex SHA-256 of an API key.
pub fn hash_api_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// The accepted `Authorization` values.
#[derive(Debug, Clone, Default)]
pub struct ApiKeySet {
    accepted: HashSet<String>,
}

impl ApiKeySet {
    /// Accepts every key as given and as its SHA-256 hex digest.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = HashSet::new();
        for key in keys {
            let key = key.as_ref();
            accepted.insert(hash_api_key(key));
            accepted.insert(key.to_string());
        }
        Self { accepted }
    }

    pub fn contains(&self, presented: &str) -> bool {
        self.accepted.contains(presented)
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Whether the key check runs at all
    pub enabled: bool,
    pub keys: ApiKeySet,
}

impl AuthConfig {
    pub fn with_keys(keys: ApiKeySet) -> Self {
        Self {
            enabled: true,
            keys,
        }
    }

    /// Every request is let through (`--noauth`).
    pub fn disabled() -> Self {
        Self::default()
    }

    /// True when `header` (the raw `Authorization` value) is accepted.
    pub fn authorizes(&self, header: Option<&str>) -> bool {
        !self.enabled || header.is_some_and(|value| self.keys.contains(value))
    }
}

/// Rejects requests without an accepted key before the handler runs.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if !state.auth.authorizes(header) {
        warn!(path = %request.uri().path(), "Unauthorized request");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
