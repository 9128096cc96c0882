use anyhow::{Context, Result};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin_test";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin_password";

/// Credentials of the configuration-defined administrator. Compared by exact
/// string match at login; never stored.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub access_ttl_minutes: u64,
    pub refresh_ttl_days: u64,
    pub admin: AdminCredentials,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env if present
        let _ = dotenvy::dotenv();

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16")?;
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://users.db?mode=rwc".to_string());
        let log_level =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".to_string());

        let jwt_secret = match std::env::var("SECRET_KEY") {
            Ok(val) => val,
            Err(_) if cfg!(debug_assertions) => "super-secret-change-me".to_string(),
            Err(err) => {
                Err(anyhow::anyhow!(err)).context("SECRET_KEY is required in release builds")?
            }
        };

        let access_ttl_minutes = std::env::var("JWT_ACCESS_EXP_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<u64>()
            .context("JWT_ACCESS_EXP_MINUTES must be a valid u64")?;
        let refresh_ttl_days = std::env::var("JWT_REFRESH_EXP_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse::<u64>()
            .context("JWT_REFRESH_EXP_DAYS must be a valid u64")?;

        let admin = AdminCredentials {
            username: std::env::var("HARDCODED_ADMIN_USERNAME")
                .unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.to_string()),
            password: std::env::var("HARDCODED_ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
        };

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
            access_ttl_minutes,
            refresh_ttl_days,
            admin,
            log_level,
        })
    }
}
