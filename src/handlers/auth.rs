// Login/refresh proxy endpoints. These only validate their input and forward
// to the identity provider's token endpoint; provider error statuses are
// mirrored back to the client.

use axum::http::HeaderMap;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::IdentityClient;
use crate::error::ApiError;

/// GET /auth/login - exchange Basic credentials for an access/refresh token pair.
pub async fn login(headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let (username, password) = basic_credentials(&headers)?;
    let identity = IdentityClient::from_config();
    let tokens = identity.password_grant(&username, &password).await?;
    Ok(Json(tokens))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// POST /auth/refresh - exchange a refresh token for a fresh pair.
pub async fn refresh(body: Option<Json<RefreshRequest>>) -> Result<Json<Value>, ApiError> {
    let token = body
        .and_then(|Json(request)| request.refresh_token)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::bad_request("refreshToken is required"))?;

    let identity = IdentityClient::from_config();
    let tokens = identity.refresh_grant(&token).await?;
    Ok(Json(tokens))
}

/// Decode `Authorization: Basic <base64(user:pass)>` into its parts.
fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
    let encoded = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Basic "))
        .ok_or_else(|| ApiError::bad_request("Authorisation header missing or incorrect"))?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| ApiError::bad_request("Invalid Basic auth credentials"))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| ApiError::bad_request("Invalid Basic auth credentials"))?;
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::bad_request("Invalid Basic auth credentials"));
    }

    Ok((username.to_string(), password.to_string()))
}
