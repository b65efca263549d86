use crate::{config, waitlist_client, web};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("web error: {0}")]
    Web(#[from] web::Error),
    #[error("waitlist client error: {0}")]
    WaitlistClient(#[from] waitlist_client::Error),
    #[error("startup error: {0:#}")]
    Startup(#[from] anyhow::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
