use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub cors_origin: Option<String>,
    pub password_hash_iterations: u32,
    pub password_hash_memory_kib: u32,
    pub superadmin_email: Option<String>,
    pub superadmin_password: Option<String>,
    pub cleanup_orphaned_namespaces: bool,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            port: parse_or(get("PORT"), "PORT", 3000)?,
            jwt_secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            auth_issuer: get("AUTH_ISSUER").unwrap_or_else(|| "barber-booking".to_string()),
            cors_origin: get("CORS_ORIGIN"),
            password_hash_iterations: parse_or(get("PASSWORD_HASH_ITERATIONS"), "PASSWORD_HASH_ITERATIONS", argon2::Params::DEFAULT_T_COST)?,
            password_hash_memory_kib: parse_or(get("PASSWORD_HASH_MEMORY_KIB"), "PASSWORD_HASH_MEMORY_KIB", argon2::Params::DEFAULT_M_COST)?,
            superadmin_email: get("SUPERADMIN_EMAIL"),
            superadmin_password: get("SUPERADMIN_PASSWORD"),
            cleanup_orphaned_namespaces: parse_or(get("CLEANUP_ORPHANED_NAMESPACES"), "CLEANUP_ORPHANED_NAMESPACES", false)?,
            log_dir: get("LOG_DIR").unwrap_or_else(|| "./logs".to_string()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_are_missing() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.auth_issuer, "barber-booking");
        assert_eq!(config.password_hash_iterations, argon2::Params::DEFAULT_T_COST);
        assert!(config.cors_origin.is_none());
        assert!(!config.cleanup_orphaned_namespaces);
        assert_eq!(config.log_dir, "./logs");
    }

    #[test]
    fn required_values_are_reported() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "sqlite://test.db")])).err();
        assert!(matches!(err, Some(ConfigError::Missing("JWT_SECRET"))));

        let err = Config::from_lookup(lookup(&[("JWT_SECRET", "s"), ("DATABASE_URL", "  ")])).err();
        assert!(matches!(err, Some(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("JWT_SECRET", "secret"),
            ("PORT", "eighty"),
        ]))
        .err();
        assert!(matches!(err, Some(ConfigError::Invalid { name: "PORT", .. })));
    }

    #[test]
    fn flags_and_seed_credentials_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/barber"),
            ("JWT_SECRET", "secret"),
            ("CLEANUP_ORPHANED_NAMESPACES", "true"),
            ("SUPERADMIN_EMAIL", "root@example.com"),
            ("SUPERADMIN_PASSWORD", "admin123"),
            ("CORS_ORIGIN", "https://shop.example.com"),
        ]))
        .unwrap();

        assert!(config.cleanup_orphaned_namespaces);
        assert_eq!(config.superadmin_email.as_deref(), Some("root@example.com"));
        assert_eq!(config.cors_origin.as_deref(), Some("https://shop.example.com"));
    }
}
