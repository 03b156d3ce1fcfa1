// Identity-provider integration: token-endpoint proxying for login/refresh
// and JWKS-based verification of incoming bearer tokens.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity provider returned no signing keys")]
    NoSigningKeys,

    #[error("invalid signing key: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),

    #[error("token verification failed: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),

    #[error("identity provider request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("identity provider returned status {status}")]
    Upstream { status: u16, body: Value },
}

/// One entry of the provider's JWKS document. Only the RSA public-key
/// components are needed for signature verification.
#[derive(Debug, Deserialize)]
pub struct Jwk {
    #[serde(default)]
    pub kid: Option<String>,
    #[serde(default)]
    pub n: String,
    #[serde(default)]
    pub e: String,
}

#[derive(Debug, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// Thin client for the Keycloak realm endpoints.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    realm: String,
    client_id: String,
    client_secret: String,
}

impl IdentityClient {
    pub fn from_config() -> Self {
        let identity = &config::config().identity;
        Self {
            http: reqwest::Client::new(),
            base_url: identity.base_url.clone(),
            realm: identity.realm.clone(),
            client_id: identity.client_id.clone(),
            client_secret: identity.client_secret.clone(),
        }
    }

    fn token_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.base_url, self.realm
        )
    }

    fn certs_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/certs",
            self.base_url, self.realm
        )
    }

    /// Exchange user credentials for tokens (password grant).
    pub async fn password_grant(&self, username: &str, password: &str) -> Result<Value, AuthError> {
        self.token_request(&[
            ("grant_type", "password"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", username),
            ("password", password),
        ])
        .await
    }

    /// Exchange a refresh token for a fresh token pair.
    pub async fn refresh_grant(&self, refresh_token: &str) -> Result<Value, AuthError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<Value, AuthError> {
        let response = self.http.post(self.token_url()).form(form).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if status.is_success() {
            Ok(body)
        } else {
            Err(AuthError::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Fetch the realm's current signing key set and build a decoding key from
    /// the first entry. No caching: every call is a network round trip.
    pub async fn fetch_signing_key(&self) -> Result<DecodingKey, AuthError> {
        let response = self.http.get(self.certs_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json().await.unwrap_or(Value::Null);
            return Err(AuthError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        let jwks: JwkSet = response.json().await?;
        let key = jwks.keys.first().ok_or(AuthError::NoSigningKeys)?;
        DecodingKey::from_rsa_components(&key.n, &key.e).map_err(AuthError::InvalidKey)
    }
}

/// Verify an RS256 bearer token against the provider's signing key. Claims
/// are not inspected beyond the standard expiry check.
pub fn verify_token(token: &str, key: &DecodingKey) -> Result<(), AuthError> {
    let validation = Validation::new(Algorithm::RS256);
    decode::<Value>(token, key, &validation).map_err(AuthError::InvalidToken)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_jwks_deserializes_first_key() {
        let doc = json!({
            "keys": [
                { "kid": "a", "kty": "RSA", "alg": "RS256", "n": "abc", "e": "AQAB" },
                { "kid": "b", "kty": "RSA", "alg": "RS256", "n": "def", "e": "AQAB" }
            ]
        });
        let jwks: JwkSet = serde_json::from_value(doc).unwrap();
        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys[0].n, "abc");
    }

    #[test]
    fn test_empty_key_set_is_an_error() {
        let jwks: JwkSet = serde_json::from_value(json!({ "keys": [] })).unwrap();
        assert!(jwks.keys.first().is_none());
    }

    #[test]
    fn test_verify_rejects_garbage_token() {
        let key = DecodingKey::from_rsa_components("AQAB", "AQAB").unwrap();
        assert!(matches!(
            verify_token("not-a-jwt", &key),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
