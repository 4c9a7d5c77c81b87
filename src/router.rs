use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;

use crate::handlers::{analysis, auth, bills, front, manage};
use crate::middleware::session::CookiePolicy;
use crate::service::flat_ops::FlatOps;

#[derive(Clone)]
pub struct FlatshareState {
    pub ops: FlatOps,
    key: Key,
    cookie_policy: CookiePolicy,
}

impl FlatshareState {
    pub fn new(ops: FlatOps, key: Key, secure_cookie: bool) -> Self {
        Self {
            ops,
            key,
            cookie_policy: CookiePolicy {
                secure: secure_cookie,
            },
        }
    }
}

impl FromRef<FlatshareState> for Key {
    fn from_ref(state: &FlatshareState) -> Self {
        state.key.clone()
    }
}

impl FromRef<FlatshareState> for CookiePolicy {
    fn from_ref(state: &FlatshareState) -> Self {
        state.cookie_policy
    }
}

pub fn flatshare_router(state: FlatshareState) -> Router {
    Router::new()
        .route("/", get(front::front))
        .route("/bills", get(bills::list_bills))
        .route("/add", post(bills::add_bill))
        .route("/analysis", get(analysis::analysis).post(analysis::analysis))
        .route("/manage", get(manage::manage).post(manage::add_member))
        .route("/change_location", post(manage::change_location))
        .route("/reset_flat", get(manage::reset_flat))
        .route("/clear_bills", get(manage::clear_bills))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .with_state(state)
}
