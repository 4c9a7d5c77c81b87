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
use crate::types::view::{BillsView, NO_MEMBERS_ADVISORY};

#[derive(Debug, Deserialize)]
pub struct AddBillForm {
    pub content: String,
    pub amount: String,
    /// Absent when the member select is empty.
    #[serde(default)]
    pub member_id: Option<String>,
}

/// GET /bills -> bills of the session's flat, newest first, with their total.
pub async fn list_bills(
    State(state): State<FlatshareState>,
    jar: SessionJar,
) -> Result<Response, FlatshareError> {
    let session = match jar.require() {
        Ok(s) => s,
        Err(err) => return render_advisory::<BillsView>(jar, "bills", err, None),
    };

    let view = state.ops.bills(session.flat_id).await?;
    let error = view
        .members
        .is_empty()
        .then(|| NO_MEMBERS_ADVISORY.to_string());
    Ok(render(jar, "bills", error, Some(view)))
}

/// POST /add -> insert a bill and redirect to the list.
///
/// Unlike every other flat-scoped route, a missing session aborts with 401
/// instead of rendering an advisory.
pub async fn add_bill(
    State(state): State<FlatshareState>,
    jar: SessionJar,
    Form(form): Form<AddBillForm>,
) -> Result<Response, FlatshareError> {
    let session = jar.require()?;

    match state
        .ops
        .add_bill(
            session.flat_id,
            &form.content,
            &form.amount,
            form.member_id.as_deref(),
        )
        .await
    {
        Ok(bill_id) => {
            info!(flat_id = session.flat_id, bill_id, "bill added");
            let jar = jar.flash("New bill was successfully added");
            Ok((jar, Redirect::to("/bills")).into_response())
        }
        Err(err) => {
            let view = state.ops.bills(session.flat_id).await?;
            render_advisory(jar, "bills", err, Some(view))
        }
    }
}
