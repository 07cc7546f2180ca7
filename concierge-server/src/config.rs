//! Server configuration
//!
//! Loaded from environment variables (after `.env`). Secrets fall back to
//! throwaway values in development and are mandatory everywhere else.

use crate::BoxError;

const MIN_SESSION_PASSWORD_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// RocksDB directory for the embedded SurrealDB
    pub database_path: String,
    pub database_ns: String,
    pub database_db: String,
    /// Mount point of the GraphQL endpoint
    pub graphql_path: String,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
    /// Password the session cookie key is derived from
    pub session_password: String,
    pub stripe_secret_key: String,
    pub stripe_webhook_secret: String,
    pub fcm_project_id: Option<String>,
    pub fcm_access_token: Option<String>,
    pub expo_access_token: Option<String>,
    /// Requests allowed per IP and window (production only)
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    /// Daily-rolling log files go here when set
    pub log_dir: Option<String>,
    /// `json` switches log output to JSON lines
    pub log_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_port: 5000,
            database_path: "data/concierge.db".into(),
            database_ns: "concierge".into(),
            database_db: "main".into(),
            graphql_path: "/graphql".into(),
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            session_password: "dev-SESSION_PASSWORD-not-for-production".into(),
            stripe_secret_key: "dev-STRIPE_SECRET_KEY-not-for-production".into(),
            stripe_webhook_secret: "dev-STRIPE_WEBHOOK_SECRET-not-for-production".into(),
            fcm_project_id: None,
            fcm_access_token: None,
            expo_access_token: None,
            rate_limit_max: 1000,
            rate_limit_window_secs: 900,
            log_dir: None,
            log_format: None,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn optional(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|s| !s.is_empty())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let session_password = Self::require_secret("SESSION_PASSWORD", &environment)?;
        if environment == "production" && session_password.len() < MIN_SESSION_PASSWORD_LEN {
            return Err(format!(
                "SESSION_PASSWORD must be at least {MIN_SESSION_PASSWORD_LEN} characters in production"
            )
            .into());
        }

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            database_path: std::env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            database_ns: std::env::var("DATABASE_NS").unwrap_or(defaults.database_ns),
            database_db: std::env::var("DATABASE_DB").unwrap_or(defaults.database_db),
            graphql_path: std::env::var("GRAPHQL_PATH").unwrap_or(defaults.graphql_path),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            session_password,
            stripe_secret_key: Self::require_secret("STRIPE_SECRET_KEY", &environment)?,
            stripe_webhook_secret: Self::require_secret("STRIPE_WEBHOOK_SECRET", &environment)?,
            fcm_project_id: Self::optional("FCM_PROJECT_ID"),
            fcm_access_token: Self::optional("FCM_ACCESS_TOKEN"),
            expo_access_token: Self::optional("EXPO_ACCESS_TOKEN"),
            rate_limit_max: std::env::var("RATE_LIMIT_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_max),
            rate_limit_window_secs: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_window_secs),
            log_dir: Self::optional("LOG_DIR"),
            log_format: Self::optional("LOG_FORMAT"),
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_falls_back_in_development() {
        let val = Config::require_secret("CONCIERGE_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(val, "dev-CONCIERGE_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_require_secret_is_mandatory_in_production() {
        assert!(Config::require_secret("CONCIERGE_TEST_UNSET_SECRET", "production").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.graphql_path, "/graphql");
        assert_eq!(config.rate_limit_max, 1000);
        assert_eq!(config.rate_limit_window_secs, 900);
        assert!(!config.is_production());
    }
}
