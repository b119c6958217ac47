use catalog_core::env::{EnvError, EnvReader};

/// Blob container that receives files from the upload handler.
pub const DEFAULT_UPLOAD_CONTAINER: &str = "netflix-catalogs";

/// Document container read and written by the catalog handlers.
pub const DEFAULT_CATALOG_CONTAINER: &str = "catalogs";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Store
/// credentials are read separately (see `catalog_store::config`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Container for uploaded files (default: `netflix-catalogs`).
    pub upload_container: String,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:8501`    |
    /// | `UPLOAD_CONTAINER`     | `netflix-catalogs`         |
    pub fn from_env() -> Result<Self, EnvError> {
        Self::read(&EnvReader::process())
    }

    pub fn read(env: &EnvReader<'_>) -> Result<Self, EnvError> {
        let cors_origins: Vec<String> = env
            .or_default("CORS_ORIGINS", "http://localhost:8501")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: env.or_default("HOST", "0.0.0.0"),
            port: env.parsed_or("PORT", 3000)?,
            cors_origins,
            upload_container: env.or_default("UPLOAD_CONTAINER", DEFAULT_UPLOAD_CONTAINER),
        })
    }
}
