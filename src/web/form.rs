//! State of the waitlist form for one render cycle.
//!
//! `WaitlistForm` holds what the visitor typed and where the submission stands.
//! A submission moves `Idle -> Submitting -> Succeeded | Failed`, and an empty email
//! goes straight to `Failed` without reaching the network.
//! Submitting takes `&mut self`, so a form never has more than one request in flight.

use axum::http::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::{
    waitlist_client::{self, WaitlistClient},
    web::types::{DataParsingError, Signup, SignupForm},
};

pub const EMAIL_REQUIRED_MSG: &str = "Please enter your email address";
pub const SUCCESS_MSG: &str = "You have been added to the waitlist!";
pub const IN_FLIGHT_MSG: &str = "Your sign-up is already being submitted";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// The feedback line rendered under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct WaitlistForm {
    email: String,
    name: String,
    status: SubmissionStatus,
}

// ###################################
// ->   IMPLs
// ###################################
impl From<SignupForm> for WaitlistForm {
    fn from(value: SignupForm) -> Self {
        WaitlistForm {
            email: value.email.unwrap_or_default(),
            name: value.name.unwrap_or_default(),
            status: SubmissionStatus::Idle,
        }
    }
}

impl WaitlistForm {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submit_disabled(&self) -> bool {
        matches!(self.status, SubmissionStatus::Submitting)
    }

    pub fn message(&self) -> Option<FormMessage> {
        let (kind, text) = match &self.status {
            SubmissionStatus::Succeeded(text) => (MessageKind::Success, text),
            SubmissionStatus::Failed(text) => (MessageKind::Error, text),
            SubmissionStatus::Idle | SubmissionStatus::Submitting => return None,
        };

        Some(FormMessage {
            kind,
            text: text.clone(),
        })
    }

    /// Validates the entered values and marks the form as submitting.
    /// An empty email fails the form right away and no request should follow.
    pub fn begin_submit(&mut self) -> Result<Signup, SubmitError> {
        if self.is_submit_disabled() {
            return Err(SubmitError::InFlight);
        }

        match Signup::parse(&self.email, &self.name) {
            Ok(signup) => {
                self.status = SubmissionStatus::Submitting;
                Ok(signup)
            }
            Err(er) => Err(self.fail(er.into())),
        }
    }

    /// Applies the outcome of the waitlist request.
    /// Success clears the fields, a failure keeps them for another try.
    pub fn finish_submit(
        &mut self,
        outcome: waitlist_client::Result<()>,
    ) -> Result<(), SubmitError> {
        match outcome {
            Ok(()) => {
                self.email.clear();
                self.name.clear();
                self.status = SubmissionStatus::Succeeded(SUCCESS_MSG.to_string());
                Ok(())
            }
            Err(er) => Err(self.fail(er.into())),
        }
    }

    /// Runs one full submission against the waitlist: a single attempt, no retries.
    #[tracing::instrument(name = "waitlist_form_submit", skip_all)]
    pub async fn submit(&mut self, client: &WaitlistClient) -> Result<(), SubmitError> {
        let signup = self.begin_submit()?;
        debug!(email = signup.email.as_ref(), "submitting sign-up");

        let outcome = client.create_subscriber(&signup).await;
        self.finish_submit(outcome)
    }

    fn fail(&mut self, er: SubmitError) -> SubmitError {
        self.status = SubmissionStatus::Failed(er.user_message());
        er
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid sign-up: {0}")]
    Invalid(#[from] DataParsingError),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("waitlist client error: {0}")]
    Waitlist(#[from] waitlist_client::Error),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(DataParsingError::EmailEmpty) => EMAIL_REQUIRED_MSG.to_string(),
            SubmitError::InFlight => IN_FLIGHT_MSG.to_string(),
            SubmitError::Waitlist(er) => er.user_message(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        use waitlist_client::Error as WaitlistError;

        match self {
            SubmitError::Invalid(_) => StatusCode::BAD_REQUEST,
            SubmitError::InFlight => StatusCode::CONFLICT,
            SubmitError::Waitlist(WaitlistError::MissingWaitlistId | WaitlistError::UrlParsing(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            SubmitError::Waitlist(WaitlistError::Rejected { .. } | WaitlistError::Reqwest(_)) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}
