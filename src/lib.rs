//! A "coming soon" landing page that collects waitlist sign-ups and forwards them
//! to the waitlist.email API.

pub mod app;
pub mod config;
mod error;
pub mod templ_manager;
pub mod waitlist_client;
pub mod web;

pub use app::{App, AppState};
pub use error::{Error, Result};
pub use waitlist_client::WaitlistClient;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Serves the application until the listener fails.
pub async fn serve(app: App) -> Result<()> {
    web::serve::serve(app).await?;
    Ok(())
}

/// Human readable output for development and tests, `RUST_LOG` overrides the `debug` default.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .compact()
        .init();
}

/// JSON lines for production, `RUST_LOG` overrides the `info` default.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}
