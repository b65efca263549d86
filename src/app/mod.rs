use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{config::AppConfig, templ_manager::TemplateManager, Result, WaitlistClient};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let waitlist_id = config.waitlist_config.waitlist_id();
        if waitlist_id.is_none() {
            // Not fatal: the page still renders, submissions fail with a configuration message.
            warn!(
                "{:<20} - no waitlist id configured, sign-ups will be refused",
                "waitlist"
            );
        }

        let tm = TemplateManager::init().context("failed to load the page templates")?;
        let waitlist_client = WaitlistClient::new(&config.waitlist_config.api_url, waitlist_id)?;
        info!("{:<20} - {}", "Waitlist endpoint:", waitlist_client.url());

        let app_state = AppState::new(tm, waitlist_client);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}

pub struct InternalState {
    pub templ_mgr: TemplateManager,
    pub waitlist_client: WaitlistClient,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(templ_mgr: TemplateManager, waitlist_client: WaitlistClient) -> Self {
        AppState(Arc::new(InternalState {
            templ_mgr,
            waitlist_client,
        }))
    }
}
