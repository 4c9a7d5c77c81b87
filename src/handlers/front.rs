use axum::response::Response;

use crate::handlers::render;
use crate::middleware::session::SessionJar;

/// GET / -> landing page. Starts without any error state.
pub async fn front(jar: SessionJar) -> Response {
    render::<()>(jar, "front", None, None)
}
