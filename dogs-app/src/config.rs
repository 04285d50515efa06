use error_stack::{Report, ResultExt};
use std::str::FromStr;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
#[error("invalid configuration for {0}")]
pub struct ConfigError(&'static str);

pub type ConfigResult<T> = Result<T, Report<ConfigError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Postgres {
        url: String,
        pool_size: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreKind,
    pub seed: bool,
    pub unique_breeds: bool,
    pub metrics: bool,
    pub public_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every setting through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store = match lookup("DOGS_STORE").as_deref().map(str::trim) {
            None | Some("memory") => StoreKind::Memory,
            Some("postgres") => StoreKind::Postgres {
                url: lookup("DATABASE_URL")
                    .ok_or(ConfigError("DATABASE_URL"))
                    .attach("required when DOGS_STORE=postgres")?,
                pool_size: parse(&lookup, "DATABASE_POOL_SIZE")?,
            },
            Some(other) => {
                return Err(Report::new(ConfigError("DOGS_STORE")))
                    .attach_with(|| format!("expected 'memory' or 'postgres', got '{other}'"));
            }
        };

        Ok(Self {
            port: parse(&lookup, "DOGS_PORT")?.unwrap_or(DEFAULT_PORT),
            store,
            seed: parse(&lookup, "DOGS_SEED")?.unwrap_or(true),
            unique_breeds: parse(&lookup, "DOGS_UNIQUE_BREEDS")?.unwrap_or(true),
            metrics: parse(&lookup, "DOGS_METRICS")?.unwrap_or(true),
            public_url: lookup("DOGS_PUBLIC_URL"),
        })
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .change_context(ConfigError(key))
                .attach_with(|| format!("could not parse '{v}'"))
        })
        .transpose()
}
