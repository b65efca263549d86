use axum::{extract::State, http::StatusCode, response::Html, Form};
use tracing::info;

use crate::{
    web::{form::WaitlistForm, types::SignupForm, WebResult},
    AppState,
};

pub async fn home(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let body = render_home(&app_state, &WaitlistForm::default())?;

    Ok(Html(body))
}

/// Scriptless submission: the form posts here and gets the page back with the outcome.
#[tracing::instrument(name = "home_post", skip_all)]
pub async fn home_post(
    State(app_state): State<AppState>,
    Form(signup): Form<SignupForm>,
) -> WebResult<(StatusCode, Html<String>)> {
    let mut form = WaitlistForm::from(signup);

    let status = match form.submit(&app_state.waitlist_client).await {
        Ok(()) => {
            info!("sign-up added to the waitlist");
            StatusCode::OK
        }
        Err(er) => {
            info!(error = %er, "sign-up failed");
            er.status_code()
        }
    };

    let body = render_home(&app_state, &form)?;
    Ok((status, Html(body)))
}

fn render_home(app_state: &AppState, form: &WaitlistForm) -> Result<String, tera::Error> {
    let mut ctx = tera::Context::new();
    ctx.insert("email", form.email());
    ctx.insert("name", form.name());
    ctx.insert("submit_disabled", &form.is_submit_disabled());
    if let Some(message) = form.message() {
        ctx.insert("message", &message);
    }

    app_state
        .templ_mgr
        .render_html_to_string(&ctx, "home.html")
}
