use serde::Deserialize;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Process-wide configuration, loaded from the environment (and `.env` in
/// development). The in-memory repository does not use `database_url`; it
/// is part of the configuration surface a persistent `ScheduleRepository`
/// would need.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub bind_address: String,
    pub database_url: String,
    pub default_academic_year: String,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bind_address = env_var_or("BIND_ADDRESS", "127.0.0.1:8080");
        let database_url = env_var_or("DATABASE_URL", "memory://schedules");
        let default_academic_year = env_var_or("DEFAULT_ACADEMIC_YEAR", "2025-2026");
        let log_filter = env_var_or("LOG_FILTER", "info,school_scheduler=debug");

        if !default_academic_year.contains(['-', '/']) {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_ACADEMIC_YEAR".to_string(),
                default_academic_year,
            ));
        }

        Ok(Self {
            bind_address,
            database_url,
            default_academic_year,
            log_filter,
        })
    }
}

fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_var_or_uses_default_when_unset() {
        let val = env_var_or("SCHOOL_SCHEDULER_NON_EXISTENT_VAR", "fallback");
        assert_eq!(val, "fallback");
    }
}
