//! Database configuration loaded from the environment.
//!
//! ## Variables
//! | Variable                        | Default      |
//! |---------------------------------|--------------|
//! | `DEPOT_DB_PATH`                 | `./depot.db` |
//! | `DEPOT_DB_MAX_CONNECTIONS`      | `5`          |
//! | `DEPOT_DB_MIN_CONNECTIONS`      | `1`          |
//! | `DEPOT_DB_CONNECT_TIMEOUT_SECS` | `30`         |
//! | `DEPOT_DB_BUSY_TIMEOUT_MS`      | `5000`       |
//! | `DEPOT_DB_RUN_MIGRATIONS`       | `true`       |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::pool::DbConfig;

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: String, value: String },

    #[error("{0} must be at least {1}")]
    TooSmall(String, u64),
}

/// Reads `name`, falling back to `default` when unset.
fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::InvalidValue {
                name: name.to_string(),
                value,
            }),
        },
        Err(_) => Ok(default),
    }
}

impl DbConfig {
    /// Builds a configuration from `DEPOT_DB_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path: String = var_or("DEPOT_DB_PATH", "./depot.db".to_string())?;
        let max_connections: u32 = var_or("DEPOT_DB_MAX_CONNECTIONS", 5)?;
        let min_connections: u32 = var_or("DEPOT_DB_MIN_CONNECTIONS", 1)?;
        let connect_timeout: u64 = var_or("DEPOT_DB_CONNECT_TIMEOUT_SECS", 30)?;
        let busy_timeout: u64 = var_or("DEPOT_DB_BUSY_TIMEOUT_MS", 5000)?;
        let run_migrations: bool = var_or("DEPOT_DB_RUN_MIGRATIONS", true)?;

        if max_connections == 0 {
            return Err(ConfigError::TooSmall("DEPOT_DB_MAX_CONNECTIONS".to_string(), 1));
        }

        Ok(DbConfig::new(path)
            .max_connections(max_connections)
            .min_connections(min_connections.min(max_connections))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .busy_timeout(Duration::from_millis(busy_timeout))
            .run_migrations(run_migrations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared
    // between test threads.

    #[test]
    fn test_var_or_default_when_unset() {
        let value: u32 = var_or("DEPOT_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_var_or_rejects_garbage() {
        env::set_var("DEPOT_TEST_GARBAGE_VARIABLE", "five");
        let result: Result<u32, _> = var_or("DEPOT_TEST_GARBAGE_VARIABLE", 7);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_var_or_parses_value() {
        env::set_var("DEPOT_TEST_PARSED_VARIABLE", " 12 ");
        let value: u32 = var_or("DEPOT_TEST_PARSED_VARIABLE", 7).unwrap();
        assert_eq!(value, 12);
    }
}
