//! Declarative client configuration.
//!
//! `ClientConfig` can be deserialised from any serde format the host already
//! uses, or read from `YTS_API_URL`, `YTS_LOG_LEVEL` and `YTS_MODULES`.

use serde::{Deserialize, Serialize};

use crate::dispatcher::{LogLevel, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::modules::ModuleSlot;

pub const ENV_API_URL: &str = "YTS_API_URL";
pub const ENV_LOG_LEVEL: &str = "YTS_LOG_LEVEL";
pub const ENV_MODULES: &str = "YTS_MODULES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub log_level: LogLevel,
    /// `None` loads every module. `Some` must name at least one.
    #[serde(default)]
    pub modules: Option<Vec<ModuleSlot>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            log_level: LogLevel::None,
            modules: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_URL) {
            if url.trim().is_empty() {
                return Err(Error::Config(format!("{ENV_API_URL} is set but empty")));
            }
            config.base_url = url;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level.parse()?;
        }
        if let Some(modules) = lookup(ENV_MODULES) {
            config.modules = Some(parse_modules(&modules)?);
        }
        Ok(config)
    }
}

fn parse_modules(raw: &str) -> Result<Vec<ModuleSlot>> {
    let modules = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<ModuleSlot>>>()?;
    if modules.is_empty() {
        return Err(Error::Config(format!("{ENV_MODULES} is set but names no module")));
    }
    Ok(modules)
}
