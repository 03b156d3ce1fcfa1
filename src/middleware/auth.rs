use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::auth::{self, IdentityClient};
use crate::error::ApiError;

/// Bearer-token verification for the resource routes.
///
/// Any failure - missing header, provider unreachable, bad signature, expired
/// token - is reported as 403. The signing key is fetched from the identity
/// provider on every request; there is no local cache.
pub async fn authenticate(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::forbidden("Missing or malformed Authorization header"))?;

    let identity = IdentityClient::from_config();
    let key = identity.fetch_signing_key().await.map_err(|err| {
        tracing::warn!("signing key fetch failed: {}", err);
        ApiError::forbidden("Token verification failed")
    })?;

    auth::verify_token(&token, &key).map_err(|err| {
        tracing::warn!("token rejected: {}", err);
        ApiError::forbidden("Token verification failed")
    })?;

    Ok(next.run(request).await)
}

/// Extract the token from a `Bearer <token>` Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
