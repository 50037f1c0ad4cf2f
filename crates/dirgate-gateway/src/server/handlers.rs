//! HTTP handlers for the gateway endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::classify;
use crate::dispatch::RequestDispatcher;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<RequestDispatcher>,
    /// When on, error responses include the full cause chain. Never enable
    /// in production.
    pub debug_errors: bool,
}

/// The single lookup endpoint. Everything is driven by query parameters.
pub async fn directory(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let params = parse_query(query.as_deref().unwrap_or(""));

    match state.dispatcher.handle(&params).await {
        Ok(xml) => (
            [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
            xml,
        )
            .into_response(),
        Err(error) => {
            let status = classify::status_for(&error);
            if status.is_server_error() {
                warn!("[Gateway] request failed: {error}");
            }
            (status, classify::error_body(&error, state.debug_errors)).into_response()
        }
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    "ok"
}

/// Decode the raw query string. A parameter given more than once keeps its
/// last value.
fn parse_query(query: &str) -> BTreeMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
