use anyhow::{Context, Result};

use crate::authz::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub user_service_url: String,
    pub user_service_timeout_secs: u64,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env if present
        let _ = dotenvy::dotenv();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16")?;
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://products.db?mode=rwc".to_string());
        let user_service_url = std::env::var("USER_SERVICE_URL")
            .unwrap_or_else(|_| "http://user-service:5000".to_string());
        let user_service_timeout_secs = std::env::var("USER_SERVICE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("USER_SERVICE_TIMEOUT_SECS must be a valid u64")?;
        let log_level =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            user_service_url,
            user_service_timeout_secs,
            log_level,
        })
    }
}
