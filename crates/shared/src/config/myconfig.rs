use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub port: u16,
    pub otlp_endpoint: String,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up
    /// a local `.env` file.
    pub fn init() -> Result<Config> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = env_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

        let run_migrations = env_or("RUN_MIGRATIONS", "false")
            .parse::<bool>()
            .context("RUN_MIGRATIONS must be true or false")?;

        let port = env_or("PORT", "8000")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let otlp_endpoint = env_or("OTEL_EXPORTER_OTLP_ENDPOINT", "http://otel-collector:4317");

        Ok(Config {
            database_url,
            max_connections,
            run_migrations,
            port,
            otlp_endpoint,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
