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
use crate::types::view::ManageView;

#[derive(Debug, Deserialize)]
pub struct AddMemberForm {
    pub member_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationForm {
    pub country: String,
}

async fn manage_view(state: &FlatshareState, flat_id: i64) -> Result<ManageView, FlatshareError> {
    Ok(ManageView::new(state.ops.list_members(flat_id).await?))
}

/// GET /manage -> the flat's members and location choices.
pub async fn manage(
    State(state): State<FlatshareState>,
    jar: SessionJar,
) -> Result<Response, FlatshareError> {
    let session = match jar.require() {
        Ok(s) => s,
        Err(err) => return render_advisory::<ManageView>(jar, "manage", err, None),
    };
    let view = manage_view(&state, session.flat_id).await?;
    Ok(render(jar, "manage", None, Some(view)))
}

/// POST /manage -> add a member, then show the updated list.
pub async fn add_member(
    State(state): State<FlatshareState>,
    jar: SessionJar,
    Form(form): Form<AddMemberForm>,
) -> Result<Response, FlatshareError> {
    let session = match jar.require() {
        Ok(s) => s,
        Err(err) => return render_advisory::<ManageView>(jar, "manage", err, None),
    };

    match state.ops.add_member(session.flat_id, &form.member_name).await {
        Ok(member) => {
            info!(flat_id = session.flat_id, member_id = member.member_id, "member added");
            let jar = jar.flash("New member was successfully added");
            let view = manage_view(&state, session.flat_id).await?;
            Ok(render(jar, "manage", None, Some(view)))
        }
        Err(err) => {
            let view = manage_view(&state, session.flat_id).await?;
            render_advisory(jar, "manage", err, Some(view))
        }
    }
}

/// POST /change_location -> store the flat's country and refresh the session currency.
pub async fn change_location(
    State(state): State<FlatshareState>,
    jar: SessionJar,
    Form(form): Form<LocationForm>,
) -> Result<Response, FlatshareError> {
    let session = match jar.require() {
        Ok(s) => s,
        Err(err) => return render_advisory::<ManageView>(jar, "manage", err, None),
    };

    match state.ops.change_location(&session, &form.country).await {
        Ok(updated) => {
            info!(flat_id = updated.flat_id, country = %form.country, "location changed");
            let jar = jar
                .login(&updated)?
                .flash("Your location was successfully changed");
            Ok((jar, Redirect::to("/manage")).into_response())
        }
        Err(err) => {
            let view = manage_view(&state, session.flat_id).await?;
            render_advisory(jar, "manage", err, Some(view))
        }
    }
}

/// GET /reset_flat -> delete every bill and member of the flat.
pub async fn reset_flat(
    State(state): State<FlatshareState>,
    jar: SessionJar,
) -> Result<Response, FlatshareError> {
    let session = match jar.require() {
        Ok(s) => s,
        Err(err) => return render_advisory::<ManageView>(jar, "manage", err, None),
    };
    state.ops.reset_flat(session.flat_id).await?;
    let jar = jar.flash("Your flat is reset");
    let view = manage_view(&state, session.flat_id).await?;
    Ok(render(jar, "manage", None, Some(view)))
}

/// GET /clear_bills -> delete every bill of the flat, keeping members.
pub async fn clear_bills(
    State(state): State<FlatshareState>,
    jar: SessionJar,
) -> Result<Response, FlatshareError> {
    let session = match jar.require() {
        Ok(s) => s,
        Err(err) => return render_advisory::<ManageView>(jar, "manage", err, None),
    };
    state.ops.clear_bills(session.flat_id).await?;
    let jar = jar.flash("All your bills are cleared");
    let view = manage_view(&state, session.flat_id).await?;
    Ok(render(jar, "manage", None, Some(view)))
}
