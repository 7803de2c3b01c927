//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

/// Minimum JWT secret length accepted in production
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime (ten years)
const MAX_JWT_EXPIRATION_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// HMAC secret for bearer tokens
    pub jwt_secret: String,

    /// Bearer token lifetime in seconds
    pub jwt_expiration_secs: i64,

    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Apply migrations/ at startup
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::MissingEnv("JWT_SECRET"))?;
        if jwt_secret.is_empty()
            || (environment == "production" && jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN)
        {
            return Err(ConfigError::InvalidValue("JWT_SECRET"));
        }

        let jwt_expiration_secs: i64 = lookup("JWT_EXPIRATION_SECS")
            .unwrap_or_else(|| "86400".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRATION_SECS"))?;
        if !(1..=MAX_JWT_EXPIRATION_SECS).contains(&jwt_expiration_secs) {
            return Err(ConfigError::InvalidValue("JWT_EXPIRATION_SECS"));
        }

        let bcrypt_cost: u32 = match lookup("BCRYPT_COST") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BCRYPT_COST"))?,
            None => bcrypt::DEFAULT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue("BCRYPT_COST"));
        }

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(_) => return Err(ConfigError::InvalidValue("RUN_MIGRATIONS")),
        };

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            jwt_secret,
            jwt_expiration_secs,
            bcrypt_cost,
            run_migrations,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_max_connections", &self.database_max_connections)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_secs", &self.jwt_expiration_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("run_migrations", &self.run_migrations)
            .finish_non_exhaustive()
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
