use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::responder::DEFAULT_FLOOR_MAP_URL;
use crate::schedule::DailyReset;

pub const DEFAULT_QUEUE_TIMEZONE: &str = "America/Los_Angeles";
pub const DEFAULT_QUEUE_RESET_HOUR: u32 = 7;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub roombot_env: String,
    pub api_bind: String,
    pub db_max_connections: u32,
    pub floor_map_url: String,
    pub queue_timezone: String,
    pub queue_reset_hour: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("ROOMBOT_DATABASE_URL"))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let roombot_env = lookup("ROOMBOT_ENV").unwrap_or_else(|| "dev".to_string());
        let api_bind = lookup("ROOMBOT_API_BIND").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let db_max_connections = parse_or(&lookup, "ROOMBOT_DB_MAX_CONNECTIONS", 10)?;
        let floor_map_url =
            lookup("ROOMBOT_FLOOR_MAP_URL").unwrap_or_else(|| DEFAULT_FLOOR_MAP_URL.to_string());
        let queue_timezone = lookup("ROOMBOT_QUEUE_TIMEZONE")
            .unwrap_or_else(|| DEFAULT_QUEUE_TIMEZONE.to_string());
        let queue_reset_hour =
            parse_or(&lookup, "ROOMBOT_QUEUE_RESET_HOUR", DEFAULT_QUEUE_RESET_HOUR)?;

        let settings = Self {
            database_url,
            roombot_env,
            api_bind,
            db_max_connections,
            floor_map_url,
            queue_timezone,
            queue_reset_hour,
        };
        settings.daily_reset()?;
        Ok(settings)
    }

    pub fn daily_reset(&self) -> Result<DailyReset, ConfigError> {
        let tz: Tz = self
            .queue_timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(self.queue_timezone.clone()))?;
        DailyReset::new(tz, self.queue_reset_hour)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
