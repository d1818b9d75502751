use std::env;

use chrono::{FixedOffset, Offset, Utc};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Without a database the service runs on the in-memory demo store.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub workflow: WorkflowSettings,
}

/// Restaurant-specific knobs the workflow estimates depend on.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowSettings {
    /// Offset of the restaurant's wall clock from UTC.
    pub utc_offset: FixedOffset,
    /// Orders the kitchen can work on at once before it counts as saturated.
    pub kitchen_capacity: usize,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            kitchen_capacity: 12,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            database_url,
            host,
            port,
            workflow: WorkflowSettings::from_env()?,
        })
    }
}

impl WorkflowSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let utc_offset = match env::var("RESTAURANT_UTC_OFFSET_MINUTES") {
            Ok(raw) => {
                let minutes: i32 = raw.parse()?;
                FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
                    anyhow::anyhow!("RESTAURANT_UTC_OFFSET_MINUTES out of range: {minutes}")
                })?
            }
            Err(_) => defaults.utc_offset,
        };

        let kitchen_capacity = env::var("KITCHEN_CAPACITY")
            .ok()
            .and_then(|c| c.parse::<usize>().ok())
            .filter(|c| *c > 0)
            .unwrap_or(defaults.kitchen_capacity);

        Ok(Self {
            utc_offset,
            kitchen_capacity,
        })
    }

    /// Kitchen load for `active` orders in the kitchen, 0.0 to 1.0.
    pub fn kitchen_load(&self, active: usize) -> f64 {
        (active as f64 / self.kitchen_capacity.max(1) as f64).min(1.0)
    }
}
