//! Runtime configuration from the environment (and `.env`, if present).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// The only origin allowed to make cross-origin requests.
    pub frontend_url: String,
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub options: PgConnectOptions,
    pub max_connections: u32,
    /// Create the target database on startup when it does not exist.
    pub create_database: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `DATABASE_URL` wins over the discrete
    /// `DB_HOST` / `DB_PORT` / `DB_NAME` / `DB_USER` / `DB_PASSWORD` variables.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let options = match get("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).map_err(|_| ConfigError::Invalid {
                name: "DATABASE_URL",
                value: url,
            })?,
            None => {
                let port = parse_or("DB_PORT", get("DB_PORT"), 5432u16)?;
                let mut opts = PgConnectOptions::new()
                    .host(get("DB_HOST").as_deref().unwrap_or("localhost"))
                    .port(port)
                    .database(&get("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?)
                    .username(&get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?);
                if let Some(password) = get("DB_PASSWORD") {
                    opts = opts.password(&password);
                }
                opts
            }
        };

        let create_database = match get("DB_CREATE_DATABASE").as_deref() {
            None => false,
            Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "DB_CREATE_DATABASE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Config {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("PORT", get("PORT"), 4000u16)?,
            frontend_url: get("FRONTEND_URL").ok_or(ConfigError::Missing("FRONTEND_URL"))?,
            database: DatabaseConfig {
                options,
                max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5u32)?,
                create_database,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn discrete_database_variables_with_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DB_NAME", "rest_api"),
            ("DB_USER", "postgres"),
            ("DB_PASSWORD", "secret"),
            ("FRONTEND_URL", "http://localhost:5173"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "0.0.0.0:4000");
        assert_eq!(config.frontend_url, "http://localhost:5173");
        assert_eq!(config.database.options.get_database(), Some("rest_api"));
        assert_eq!(config.database.options.get_host(), "localhost");
        assert_eq!(config.database.options.get_port(), 5432);
        assert_eq!(config.database.max_connections, 5);
        assert!(!config.database.create_database);
    }

    #[test]
    fn database_url_takes_precedence() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://app:pw@db.internal:6543/catalog"),
            ("DB_NAME", "ignored"),
            ("FRONTEND_URL", "https://shop.example.com"),
            ("PORT", "8080"),
            ("DB_CREATE_DATABASE", "true"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.options.get_database(), Some("catalog"));
        assert_eq!(config.database.options.get_port(), 6543);
        assert!(config.database.create_database);
    }

    #[test]
    fn frontend_url_is_required() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/catalog")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("FRONTEND_URL")));
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("FRONTEND_URL", "http://localhost:5173"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }
}
