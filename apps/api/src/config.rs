use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Store backend selector. Only "sqlite" ships today; the value exists so
    /// adding a second backend is a config change, not a call-site change.
    pub store_backend: String,
    pub auth_password: String,
    /// Optional: generation requests fail with a configuration error until
    /// this is set. Everything else works without it.
    pub openai_api_key: Option<String>,
    pub cors_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://presets.db".to_string()),
            store_backend: std::env::var("STORE_BACKEND").unwrap_or_else(|_| "sqlite".to_string()),
            auth_password: require_env("AUTH_PASSWORD")?,
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| {
                    vec![
                        "http://localhost:3000".to_string(),
                        "http://localhost:8080".to_string(),
                    ]
                }),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
