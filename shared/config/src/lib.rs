pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3020;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings for the connector service, read from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub run_migrations: bool,
    pub upstream_user_agent: String,
    pub cors_allowed_origin: Option<String>,
}

impl ServiceConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("CONNECTOR_SERVICE_PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Invalid CONNECTOR_SERVICE_PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            host: non_empty("CONNECTOR_SERVICE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: non_empty("DATABASE_URL").or_else(|| non_empty("DATABASE_URL_NEON")),
            db_max_connections: non_empty("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            run_migrations: non_empty("DB_RUN_MIGRATIONS")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            upstream_user_agent: non_empty("UPSTREAM_USER_AGENT").unwrap_or_else(|| {
                format!("custom-connectors/{}", env!("CARGO_PKG_VERSION"))
            }),
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN"),
        }
    }

    /// Without a database the service keeps connectors in memory.
    pub fn is_minimal_mode(&self) -> bool {
        self.database_url.is_none()
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
