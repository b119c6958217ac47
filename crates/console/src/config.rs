use catalog_core::env::{EnvError, EnvReader};

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8501`).
    pub port: u16,
    /// Base URL of the catalog API, including the `/api` prefix.
    pub api_base_url: String,
}

impl ConsoleConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `CONSOLE_HOST`         | `0.0.0.0`                    |
    /// | `CONSOLE_PORT`         | `8501`                       |
    /// | `CATALOG_API_BASE_URL` | `http://localhost:3000/api`  |
    pub fn from_env() -> Result<Self, EnvError> {
        Self::read(&EnvReader::process())
    }

    pub fn read(env: &EnvReader<'_>) -> Result<Self, EnvError> {
        Ok(Self {
            host: env.or_default("CONSOLE_HOST", "0.0.0.0"),
            port: env.parsed_or("CONSOLE_PORT", 8501)?,
            api_base_url: env
                .or_default("CATALOG_API_BASE_URL", "http://localhost:3000/api")
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
