//! The route tree wrapped in request ids, per-request spans and the error response mapper.
use std::time::Duration;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, Request, Response, StatusCode},
    middleware, Router,
};
use strum_macros::AsRefStr;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{field, info, info_span, warn, Span};

use crate::{App, AppState};

use super::{midware, routes::routes, WebResult, REQUEST_ID_HEADER};

/// Serves the app on its listener until `axum::serve` fails.
pub async fn serve(app: App) -> WebResult<()> {
    let App {
        app_state,
        listener,
    } = app;

    axum::serve(listener, app_router(app_state)).await?;

    Ok(())
}

/// All routes with the middleware stack, outermost layer first.
pub fn app_router(app_state: AppState) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    routes(app_state).layer(
        ServiceBuilder::new()
            // Keeps an id sent by the client, generates one otherwise.
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                MakeRequestUuid,
            ))
            // Outside the mapper so the error bodies it builds still carry the id.
            .layer(PropagateRequestIdLayer::new(x_request_id))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(request_span)
                    .on_request(())
                    .on_response(record_outcome),
            )
            .layer(middleware::map_response(midware::response_mapper)),
    )
}

/// How a request ended, recorded on its span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
enum Outcome {
    Success,
    Redirect,
    ClientError,
    ServerError,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Outcome::ServerError
        } else if status.is_client_error() {
            Outcome::ClientError
        } else if status.is_redirection() {
            Outcome::Redirect
        } else {
            Outcome::Success
        }
    }
}

fn request_span(req: &Request<Body>) -> Span {
    let req_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .unwrap_or_default();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("<unmatched>");

    info_span!(
        "request",
        req_id,
        method = %req.method(),
        route,
        outcome = field::Empty
    )
}

fn record_outcome(res: &Response<Body>, latency: Duration, span: &Span) {
    let status = res.status().as_u16();
    let outcome = Outcome::of(res.status());
    span.record("outcome", outcome.as_ref());

    // Upstream or configuration failures show up as 5xx, visitor mistakes as 4xx.
    match outcome {
        Outcome::ServerError => warn!(?latency, status, "request failed"),
        _ => info!(?latency, status, "request done"),
    }
}
