use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Identity-provider (Keycloak) settings used by the auth middleware and the
/// login/refresh proxy endpoints.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub base_url: String,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        };

        // Test runs are forced onto their own port so they never collide with
        // a locally running dev instance.
        let port = if environment == Environment::Test {
            4001
        } else {
            env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000)
        };

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let connect_timeout_secs = env::var("DATABASE_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            environment,
            server: ServerConfig { port },
            database: DatabaseConfig {
                max_connections,
                connect_timeout_secs,
            },
            identity: IdentityConfig {
                base_url: env::var("KEYCLOAK_URL").unwrap_or_default(),
                realm: env::var("KEYCLOAK_REALM").unwrap_or_else(|_| "tasks".to_string()),
                client_id: env::var("KEYCLOAK_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("KEYCLOAK_CLIENT_SECRET").unwrap_or_default(),
            },
        }
    }

    /// Authentication is switched off entirely when running tests.
    pub fn auth_enabled(&self) -> bool {
        self.environment != Environment::Test
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
