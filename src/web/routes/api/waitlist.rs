use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::{
    web::{
        form::{WaitlistForm, SUCCESS_MSG},
        types::SignupForm,
        WebResult,
    },
    AppState,
};

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub message: String,
}

/// Scripted submission from the landing page.
/// Failures, an unreadable body included, are turned into the JSON client error
/// by the response mapper.
#[tracing::instrument(name = "Joining the waitlist", skip_all)]
pub async fn waitlist_join(
    State(app_state): State<AppState>,
    signup: Result<Json<SignupForm>, JsonRejection>,
) -> WebResult<Json<JoinResponse>> {
    let Json(signup) = signup?;
    let mut form = WaitlistForm::from(signup);
    form.submit(&app_state.waitlist_client).await?;

    info!("sign-up added to the waitlist");
    let message = form
        .message()
        .map(|msg| msg.text)
        .unwrap_or_else(|| SUCCESS_MSG.to_string());

    Ok(Json(JoinResponse { message }))
}
