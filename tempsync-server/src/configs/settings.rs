use std::env;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::errors::DEFAULT_ISSUE_TRACKER;

pub const DEFAULT_API_URL: &str = "https://tempstickapi.com/api/v1/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempStick {
    pub api_url: String,
    pub api_key: String,
    /// Extra seconds added before the first poll of every device
    pub delay: u64,
    pub request_timeout: Option<u64>,
    pub rediscover_interval: Option<u64>,
    pub issue_tracker: String,
}

impl TempStick {
    pub fn user_delay(&self) -> Duration {
        Duration::from_secs(self.delay)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_secs)
    }

    pub fn rediscover_interval(&self) -> Option<Duration> {
        self.rediscover_interval
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persistence {
    /// Cached accessory file, kept in memory when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub tempstick: TempStick,
    pub storage: Persistence,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let settings: Settings = Self::defaults()?
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::with_prefix("TEMPSYNC").separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8581)?
            .set_default("logger.level", "info")?
            .set_default("tempstick.api_url", DEFAULT_API_URL)?
            .set_default("tempstick.api_key", "")?
            .set_default("tempstick.delay", 0)?
            .set_default("tempstick.issue_tracker", DEFAULT_ISSUE_TRACKER)?
            .set_default("storage.path", "accessories.json")
    }

    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.tempstick.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "tempstick.api_key is required to query the TempStick API".into(),
            ));
        }

        if self.tempstick.api_url.trim().is_empty() {
            return Err(ConfigError::Message("tempstick.api_url must not be empty".into()));
        }

        if !self.tempstick.api_url.ends_with('/') {
            self.tempstick.api_url.push('/');
        }

        if let Some(path) = &self.storage.path {
            if path.trim().is_empty() {
                self.storage.path = None;
            }
        }

        Ok(self)
    }
}
