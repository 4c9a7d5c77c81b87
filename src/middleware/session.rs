use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;
use tracing::warn;

use crate::error::FlatshareError;
use crate::types::session::FlatSession;

pub const SESSION_COOKIE: &str = "flatshare_session";
pub const FLASH_COOKIE: &str = "flatshare_flash";

#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
}

/// Encrypted cookie jar holding the logged-in flat and pending flash messages.
///
/// Reading never fails: a missing or tampered cookie is treated as "not logged
/// in". Handlers return the jar as part of their response so additions and
/// removals reach the client.
pub struct SessionJar {
    jar: PrivateCookieJar,
    policy: CookiePolicy,
}

impl<S> FromRequestParts<S> for SessionJar
where
    S: Send + Sync,
    Key: FromRef<S>,
    CookiePolicy: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self {
            jar,
            policy: CookiePolicy::from_ref(state),
        })
    }
}

impl IntoResponseParts for SessionJar {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

impl SessionJar {
    pub fn session(&self) -> Option<FlatSession> {
        let cookie = self.jar.get(SESSION_COOKIE)?;
        serde_json::from_str(cookie.value())
            .inspect_err(|e| warn!(error = %e, "discarding malformed session cookie"))
            .ok()
    }

    pub fn require(&self) -> Result<FlatSession, FlatshareError> {
        self.session().ok_or(FlatshareError::AuthRequired)
    }

    pub fn login(self, session: &FlatSession) -> Result<Self, FlatshareError> {
        let value = serde_json::to_string(session)?;
        let cookie = build_cookie(SESSION_COOKIE, value, self.policy, None);
        Ok(Self {
            jar: self.jar.add(cookie),
            policy: self.policy,
        })
    }

    /// Drop the session cookie. Safe to call when nobody is logged in.
    pub fn logout(self) -> Self {
        Self {
            jar: self.jar.remove(clear_cookie(SESSION_COOKIE)),
            policy: self.policy,
        }
    }

    /// Queue a message for the next rendered page.
    pub fn flash(self, message: impl Into<String>) -> Self {
        let mut pending = self.pending_flashes();
        pending.push(message.into());
        match serde_json::to_string(&pending) {
            Ok(value) => {
                let cookie = build_cookie(FLASH_COOKIE, value, self.policy, Some(Duration::minutes(5)));
                Self {
                    jar: self.jar.add(cookie),
                    policy: self.policy,
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to encode flash messages");
                self
            }
        }
    }

    /// Consume every queued flash message.
    pub fn take_flashes(self) -> (Self, Vec<String>) {
        let pending = self.pending_flashes();
        if pending.is_empty() {
            return (self, pending);
        }
        let jar = self.jar.remove(clear_cookie(FLASH_COOKIE));
        (
            Self {
                jar,
                policy: self.policy,
            },
            pending,
        )
    }

    fn pending_flashes(&self) -> Vec<String> {
        self.jar
            .get(FLASH_COOKIE)
            .and_then(|c| serde_json::from_str(c.value()).ok())
            .unwrap_or_default()
    }
}

fn build_cookie(
    name: &str,
    value: String,
    policy: CookiePolicy,
    max_age: Option<Duration>,
) -> Cookie<'static> {
    let mut builder = Cookie::build(Cookie::new(name.to_string(), value))
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(SameSite::Lax);
    if let Some(age) = max_age {
        builder = builder.max_age(age);
    }
    builder.build()
}

fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
