//! Builds the `AppConfig` out of layered sources with `figment`.
//! Later sources override earlier ones:
//! `config/base.toml`, `config/{environment}.toml`, `APP_*` variables and finally `WAITLIST_ID`.

mod error;
mod types;

use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, Environment, NetConfig, WaitlistConfig};

/// Selects which `config/{environment}.toml` gets layered on top of `base.toml`.
pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";
/// Holds the identifier of the waitlist that sign-ups are submitted to.
pub const WAITLIST_ID_VAR: &str = "WAITLIST_ID";

/// Loads the configuration from the `config` directory in the current working directory
/// and the process environment.
pub fn load_config() -> ConfigResult<AppConfig> {
    let config_dir = std::env::current_dir()?.join("config");
    let environment = Environment::from_env()?;
    info!("{:<20} - {}", "Loading config for:", environment.as_ref());

    let config = AppConfig::figment(&config_dir, environment).extract()?;
    Ok(config)
}
