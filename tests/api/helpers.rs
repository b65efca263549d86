//! Spawns the application on a random port, with a mock standing in for the waitlist API.
use std::{net::SocketAddr, sync::OnceLock};

use anyhow::Result;
use comingsoon::{
    config::{AppConfig, NetConfig, WaitlistConfig},
    init_dbg_tracing, App,
};
use reqwest::Response;
use serde::Serialize;
use wiremock::MockServer;

pub const TEST_WAITLIST_ID: &str = "wl_test";

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    pub waitlist_server: MockServer,
}

/// Set `TEST_LOG` to see the application logs while testing.
fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_dbg_tracing();
        }
    });
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_waitlist_id(Some(TEST_WAITLIST_ID)).await
    }

    /// Trying to bind port 0 will trigger an OS scan for an available port
    /// which will then be bound to the application.
    pub async fn spawn_with_waitlist_id(waitlist_id: Option<&str>) -> Result<Self> {
        init_test_subscriber();

        let waitlist_server = MockServer::start().await;
        let config = AppConfig {
            net_config: NetConfig {
                host: [127, 0, 0, 1],
                app_port: 0,
            },
            waitlist_config: WaitlistConfig {
                api_url: waitlist_server.uri(),
                waitlist_id: waitlist_id.map(str::to_string),
            },
        };

        let app = App::build_from_config(config).await?;
        let addr = app.local_addr()?;
        tokio::spawn(comingsoon::serve(app));

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(TestApp {
            addr,
            http_client,
            waitlist_server,
        })
    }

    pub async fn home_get(&self) -> Result<Response> {
        let res = self
            .http_client
            .get(format!("http://{}/", self.addr))
            .send()
            .await?;
        Ok(res)
    }

    /// Posts the landing page form the way a browser without scripting does.
    pub async fn home_post<B: Serialize + ?Sized>(&self, form: &B) -> Result<Response> {
        let res = self
            .http_client
            .post(format!("http://{}/", self.addr))
            .form(form)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn api_waitlist_post(&self, body: &serde_json::Value) -> Result<Response> {
        let res = self
            .http_client
            .post(format!("http://{}/api/waitlist", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }
}

/// The value attribute rendered for one of the form inputs.
pub fn input_value_attr(field: &str, value: &str) -> String {
    format!(r#"name="{field}" value="{value}""#)
}

pub fn submit_is_disabled(html: &str) -> bool {
    html.contains(r#"id="submit" disabled"#)
}

/// The rendered feedback line. The page script carries the same texts, so match the whole element.
pub fn message_div(kind: &str, text: &str) -> String {
    format!(r#"class="message {kind}" role="status">{text}</div>"#)
}
