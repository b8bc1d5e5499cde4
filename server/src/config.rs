use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Server settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub page_size: u64,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr = parse_or(&lookup, "BIND_ADDR", || SocketAddr::from(DEFAULT_BIND_ADDR))?;
        let page_size = parse_or(&lookup, "PAGE_SIZE", || list_query::DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                name: "PAGE_SIZE",
                value: "0".to_owned(),
            });
        }
        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", || DEFAULT_MAX_CONNECTIONS)?;
        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", || true)?;

        Ok(Self {
            database_url,
            bind_addr,
            page_size,
            max_connections,
            run_migrations,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default()),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}
