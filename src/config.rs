use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Enables the MIME-based browsing features; when off, transformation
    /// metadata is never written.
    pub browse_mime: bool,
    /// Database the bootstrap DDL is applied to.
    pub seed_database: String,
    /// Optional bootstrap DDL overriding the built-in demo schema.
    pub seed_schema: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("APP_PORT must be a valid u16")?;

        let browse_mime =
            parse_bool(&env::var("BROWSE_MIME").unwrap_or_else(|_| "true".to_string()))
                .context("BROWSE_MIME must be a boolean")?;

        let seed_database = env::var("SEED_DATABASE").unwrap_or_else(|_| "demo".to_string());
        let seed_schema = env::var("SEED_SCHEMA").ok();

        Ok(Self {
            host,
            port,
            browse_mime,
            seed_database,
            seed_schema,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(anyhow::anyhow!("unrecognized boolean value: {other}")),
    }
}
