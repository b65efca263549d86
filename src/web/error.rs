use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::form::SubmitError;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("waitlist submission error: {0}")]
    Submit(#[from] SubmitError),
    #[error("request body rejected: {0}")]
    JsonBody(#[from] JsonRejection),

    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::Submit(er @ SubmitError::Invalid(_)) => {
                (er.status_code(), InvalidInput(er.user_message()))
            }
            Error::Submit(er @ SubmitError::InFlight) => {
                (er.status_code(), SubmissionInProgress(er.user_message()))
            }
            Error::Submit(er) => (er.status_code(), WaitlistUnavailable(er.user_message())),
            Error::JsonBody(rejection) => {
                (StatusCode::BAD_REQUEST, InvalidInput(rejection.body_text()))
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The only error shape clients get to see.
/// Serializes as `{"message": <variant>, "detail": <text shown to the visitor>}`.
#[derive(Debug, AsRefStr, Serialize, derive_more::Display)]
#[serde(tag = "message", content = "detail")]
pub enum ClientError {
    #[display("{_0}")]
    InvalidInput(String),
    #[display("{_0}")]
    WaitlistUnavailable(String),
    #[display("{_0}")]
    SubmissionInProgress(String),
    #[display("Service Error!")]
    ServiceError,
}
