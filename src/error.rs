// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Error bodies are JSON-encoded plain strings (`"message"`), not a structured
/// envelope - that is the wire contract the frontend already depends on.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (malformed or incomplete client input)
    BadRequest(String),

    // 403 Forbidden (missing/invalid bearer token)
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // Identity-provider call failed with a status of its own; mirrored to the client
    Upstream { status: u16, body: Value },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Upstream { status, .. } => *status,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Convert to the JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::InternalServerError(msg) => Value::String(msg.clone()),
            ApiError::Upstream { body, .. } => body.clone(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Log the real error but return a generic message
        tracing::error!("database error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        match err {
            crate::auth::AuthError::Upstream { status, body } => ApiError::Upstream { status, body },
            other => {
                tracing::error!("identity provider error: {}", other);
                ApiError::internal_server_error(other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Upstream { status, .. } => write!(f, "upstream error ({})", status),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::forbidden("x").status_code(), 403);
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::internal_server_error("x").status_code(), 500);
    }

    #[test]
    fn test_body_is_a_plain_json_string() {
        let err = ApiError::not_found("Board with id '123' not found");
        assert_eq!(err.to_json(), json!("Board with id '123' not found"));
    }

    #[test]
    fn test_upstream_status_is_mirrored() {
        let err = ApiError::Upstream {
            status: 401,
            body: json!({"error": "invalid_grant"}),
        };
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.to_json(), json!({"error": "invalid_grant"}));
    }
}
