use axum::{extract::State, response::Response};

use crate::error::FlatshareError;
use crate::handlers::{render, render_advisory};
use crate::middleware::session::SessionJar;
use crate::router::FlatshareState;
use crate::service::ledger::Analysis;
use crate::types::view::NO_MEMBERS_ADVISORY;

/// GET|POST /analysis -> each member's balance against an even split.
pub async fn analysis(
    State(state): State<FlatshareState>,
    jar: SessionJar,
) -> Result<Response, FlatshareError> {
    let session = match jar.require() {
        Ok(s) => s,
        Err(err) => return render_advisory::<Analysis>(jar, "analysis", err, None),
    };

    let analysis = state.ops.analysis(session.flat_id).await?;
    let error = analysis
        .results
        .is_empty()
        .then(|| NO_MEMBERS_ADVISORY.to_string());
    Ok(render(jar, "analysis", error, Some(analysis)))
}
