//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_POPULAR_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" | "pg" => Ok(StorageBackend::Postgres),
            other => Err(anyhow!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    /// Required when `storage_backend` is `Postgres`.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bind_addr: String,
    /// Used by `/films/popular` when `count` is omitted.
    pub popular_default_count: usize,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(v) => v.parse().context("STORAGE_BACKEND")?,
            None => StorageBackend::Memory,
        };
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set when STORAGE_BACKEND=postgres"));
        }

        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?.max(1);
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let popular_default_count = parse_or("POPULAR_DEFAULT_COUNT", &lookup, DEFAULT_POPULAR_COUNT)?;

        Ok(Self {
            storage_backend,
            database_url,
            db_max_connections,
            bind_addr,
            popular_default_count,
        })
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{} must be a valid number: {}", key, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.storage_backend, StorageBackend::Memory);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.popular_default_count, 10);
        assert_eq!(cfg.db_max_connections, 5);
    }

    #[test]
    fn postgres_requires_database_url() {
        assert!(config(&[("STORAGE_BACKEND", "postgres")]).is_err());
        let cfg = config(&[
            ("STORAGE_BACKEND", "Postgres"),
            ("DATABASE_URL", "postgres://localhost/filmorate"),
        ])
        .unwrap();
        assert_eq!(cfg.storage_backend, StorageBackend::Postgres);
    }

    #[test]
    fn invalid_numbers_name_the_variable() {
        let err = config(&[("POPULAR_DEFAULT_COUNT", "-3")]).unwrap_err();
        assert!(err.to_string().contains("POPULAR_DEFAULT_COUNT"));
    }
}
