use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::web::types::Signup;

/// Path of the subscriber creation endpoint, relative to the service base URL.
pub const CREATE_SUBSCRIBER_PATH: &str = "api/subscribers/create";
pub const FALLBACK_ERROR_MSG: &str = "Something went wrong";
pub const MISSING_WAITLIST_ID_MSG: &str =
    "Waitlist ID not configured. Please check your deployment settings.";

/// Opaque identifier of the waitlist that sign-ups are submitted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistId(String);

impl WaitlistId {
    /// Returns `None` for a blank identifier.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| WaitlistId(value.to_owned()))
    }
}

impl AsRef<str> for WaitlistId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Submits sign-ups to the waitlist service.
/// A single attempt per call: no retries and no client-side timeout.
#[derive(Debug)]
pub struct WaitlistClient {
    http_client: Client,
    url: reqwest::Url,
    waitlist_id: Option<WaitlistId>,
}

impl WaitlistClient {
    pub fn new<S: AsRef<str>>(base_url: S, waitlist_id: Option<WaitlistId>) -> Result<Self> {
        let url = reqwest::Url::parse(base_url.as_ref())
            .and_then(|base| base.join(CREATE_SUBSCRIBER_PATH))
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().build()?;

        Ok(WaitlistClient {
            http_client,
            url,
            waitlist_id,
        })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }

    pub fn waitlist_id(&self) -> Option<&WaitlistId> {
        self.waitlist_id.as_ref()
    }

    /// Adds `signup` to the configured waitlist.
    /// Fails without touching the network when no waitlist id is configured.
    #[tracing::instrument(name = "create_subscriber", skip_all, fields(url = %self.url))]
    pub async fn create_subscriber(&self, signup: &Signup) -> Result<()> {
        let waitlist = self.waitlist_id.as_ref().ok_or(Error::MissingWaitlistId)?;

        let body = CreateSubscriber {
            waitlist: waitlist.as_ref(),
            email: signup.email.as_ref(),
            name: signup.name.as_ref().map(AsRef::as_ref),
        };

        let resp = self.http_client.post(self.url.clone()).json(&body).send().await?;
        let status = resp.status();
        if status.is_success() {
            info!(%status, "subscriber created");
            return Ok(());
        }

        // The body of a rejection is only used for its message, a malformed one falls back.
        let message = resp
            .json::<ApiMessage>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|msg| !msg.trim().is_empty());
        warn!(%status, ?message, "waitlist rejected the subscriber");

        Err(Error::Rejected { status, message })
    }
}

#[derive(Serialize)]
pub struct CreateSubscriber<'a> {
    pub waitlist: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("waitlist id is not configured")]
    MissingWaitlistId,
    #[error("waitlist responded with {status}: {message:?}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl Error {
    /// The text shown to the person signing up.
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingWaitlistId => MISSING_WAITLIST_ID_MSG.to_string(),
            Error::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => FALLBACK_ERROR_MSG.to_string(),
        }
    }
}
