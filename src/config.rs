use anyhow::{Context, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Clone)]
pub struct RecipeServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_address: String,
    pub jwt_secret: String,
}

impl RecipeServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source, `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .context("Failed to determine DATABASE_URL from environment variables")?;

        let max_connections = lookup("MAX_CONNECTIONS")
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .context("Failed to determine JWT_SECRET from environment variables")?;

        Ok(Self {
            database_url,
            max_connections,
            bind_address,
            jwt_secret,
        })
    }
}
