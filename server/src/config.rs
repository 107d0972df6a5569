use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use chrono::TimeDelta;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Sessions cannot outlive a century.
pub const MAX_SESSION_TTL_DAYS: i64 = 36_500;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session_ttl: TimeDelta,
    /// Use insecure (fast) password hashing for dev/test environments
    pub insecure_password_hashing: bool,
    pub otel_endpoint: Option<String>,
    pub otel_service_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "cookbook.db".to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            session_ttl: TimeDelta::days(30),
            insecure_password_hashing: false,
            otel_endpoint: None,
            otel_service_name: "cookbook-server".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let session_ttl_days: i64 = try_load("SESSION_TTL_DAYS", defaults.session_ttl.num_days())?;
        let session_ttl = session_ttl_from_days(session_ttl_days)?;

        Ok(Self {
            database_url: try_load("DATABASE_URL", defaults.database_url)?,
            bind_addr: try_load("BIND_ADDR", defaults.bind_addr)?,
            session_ttl,
            insecure_password_hashing: env::var("INSECURE_PASSWORD_HASHING").is_ok(),
            otel_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            otel_service_name: try_load("OTEL_SERVICE_NAME", defaults.otel_service_name)?,
        })
    }
}

fn session_ttl_from_days(days: i64) -> Result<TimeDelta, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "SESSION_TTL_DAYS",
        value: days.to_string(),
        reason,
    };

    if days <= 0 {
        return Err(invalid("must be positive".to_string()));
    }
    if days > MAX_SESSION_TTL_DAYS {
        return Err(invalid(format!("must be at most {}", MAX_SESSION_TTL_DAYS)));
    }
    TimeDelta::try_days(days).ok_or_else(|| invalid("out of range".to_string()))
}

fn try_load<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.database_url, "cookbook.db");
        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.session_ttl, TimeDelta::days(30));
        assert!(!settings.insecure_password_hashing);
    }

    #[test]
    fn test_session_ttl_bounds() {
        assert_eq!(session_ttl_from_days(7).unwrap(), TimeDelta::days(7));
        assert!(session_ttl_from_days(0).is_err());
        assert!(session_ttl_from_days(-1).is_err());
        assert!(session_ttl_from_days(MAX_SESSION_TTL_DAYS + 1).is_err());

        let err = session_ttl_from_days(i64::MAX).unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_DAYS"), "{}", err);
    }

    #[test]
    fn test_try_load_falls_back_when_unset() {
        let value: u16 = try_load("COOKBOOK_TEST_NEVER_SET", 42).unwrap();
        assert_eq!(value, 42);
    }
}
