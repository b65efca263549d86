//! The configuration structs used to build the AppConfig, and their impls.
use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use strum_macros::AsRefStr;

use super::{ConfigError, ConfigResult, ENVIRONMENT_VAR, WAITLIST_ID_VAR};
use crate::waitlist_client::WaitlistId;

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub waitlist_config: WaitlistConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WaitlistConfig {
    /// Base URL of the waitlist service, the subscriber endpoint is joined onto it.
    pub api_url: String,
    #[serde(default)]
    pub waitlist_id: Option<String>,
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// All the configuration sources layered in order of precedence, lowest first.
    pub fn figment(config_dir: &Path, environment: Environment) -> Figment {
        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment.file_name())))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&[WAITLIST_ID_VAR])
                    .map(|_| "waitlist_config.waitlist_id".into()),
            )
    }
}

impl Environment {
    /// Reads `APP_ENVIRONMENT`, defaulting to `local` when unset.
    pub fn from_env() -> ConfigResult<Self> {
        std::env::var(ENVIRONMENT_VAR)
            .unwrap_or_else(|_| "local".into())
            .try_into()
    }

    pub fn file_name(&self) -> String {
        format!("{}.toml", self.as_ref())
    }
}

impl WaitlistConfig {
    /// A blank identifier counts as missing.
    pub fn waitlist_id(&self) -> Option<WaitlistId> {
        self.waitlist_id.as_deref().and_then(WaitlistId::parse)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}
