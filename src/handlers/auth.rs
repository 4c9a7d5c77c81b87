use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::error::FlatshareError;
use crate::handlers::{render, render_advisory};
use crate::middleware::session::SessionJar;
use crate::router::FlatshareState;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub flat_name: String,
    pub password: String,
}

/// GET /signup -> signup form, or back to the front page when already logged in.
pub async fn signup_page(jar: SessionJar) -> Response {
    if jar.session().is_some() {
        let jar = jar.flash("You were logged in");
        return (jar, Redirect::to("/")).into_response();
    }
    render::<()>(jar, "signup", None, None)
}

/// POST /signup -> register the flat and show the login form.
pub async fn signup(
    State(state): State<FlatshareState>,
    jar: SessionJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, FlatshareError> {
    match state.ops.signup(&form.flat_name, &form.password).await {
        Ok(_) => {
            let jar = jar.flash("Signup successfully, please log in");
            Ok(render::<()>(jar, "login", None, None))
        }
        Err(err) => render_advisory::<()>(jar, "signup", err, None),
    }
}

/// GET /login -> login form.
pub async fn login_page(jar: SessionJar) -> Response {
    render::<()>(jar, "login", None, None)
}

/// POST /login -> verify credentials and start a session.
pub async fn login(
    State(state): State<FlatshareState>,
    jar: SessionJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, FlatshareError> {
    match state.ops.login(&form.flat_name, &form.password).await {
        Ok(session) => {
            info!(flat_id = session.flat_id, "flat logged in");
            let jar = jar
                .login(&session)?
                .flash(format!("Welcome back, {}", session.flat_name));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(err) => render_advisory::<()>(jar, "login", err, None),
    }
}

/// GET /logout -> drop the session. Idempotent.
pub async fn logout(jar: SessionJar) -> Response {
    let jar = jar.logout().flash("You were logged out");
    (jar, Redirect::to("/")).into_response()
}
