//! One handler per user-facing action. Validation and auth failures are
//! rendered as the page's `error` advisory; only infrastructure failures
//! escape as `FlatshareError` responses.

pub mod analysis;
pub mod auth;
pub mod bills;
pub mod front;
pub mod manage;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::FlatshareError;
use crate::middleware::session::SessionJar;
use crate::types::view::{Page, SessionView};

/// Build the page document, draining pending flash messages into it.
pub(crate) fn render<T: Serialize>(
    jar: SessionJar,
    view: &'static str,
    error: Option<String>,
    data: Option<T>,
) -> Response {
    let session = jar.session().as_ref().map(SessionView::from);
    let (jar, flashes) = jar.take_flashes();
    let page = Page {
        view,
        session,
        flashes,
        error,
        data,
    };
    (jar, Json(page)).into_response()
}

/// Render `err` inline when it is a user-facing failure, otherwise propagate it.
pub(crate) fn render_advisory<T: Serialize>(
    jar: SessionJar,
    view: &'static str,
    err: FlatshareError,
    data: Option<T>,
) -> Result<Response, FlatshareError> {
    match err.advisory() {
        Some(message) => Ok(render(jar, view, Some(message), data)),
        None => Err(err),
    }
}
