use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub app_name: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_pool_size: u32,
    pub store: StoreKind,
    pub log_level: String,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "8080");
        let port = port.parse::<u16>().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            expected: "a port number",
            value: port.clone(),
        })?;

        let pool_size = var("DATABASE_POOL_SIZE", "8");
        let database_pool_size = match pool_size.parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "DATABASE_POOL_SIZE",
                    expected: "a positive integer",
                    value: pool_size,
                })
            }
        };

        let store = match var("TODO_STORE", "sqlite").to_ascii_lowercase().as_str() {
            "sqlite" => StoreKind::Sqlite,
            "memory" => StoreKind::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "TODO_STORE",
                    expected: "`sqlite` or `memory`",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            app_name: var("APP_NAME", "todo-api"),
            host: var("HOST", "127.0.0.1"),
            port,
            database_url: var("DATABASE_URL", "todos.sqlite3"),
            database_pool_size,
            store,
            log_level: var("LOG_LEVEL", "info"),
        })
    }
}
