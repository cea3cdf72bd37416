//! Pending-login cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::domain::types::SESSION_TTL_SECS;

/// Cookie name carrying the opaque pending-login session id.
pub const PENDING_LOGIN: &str = "pending_login";

/// Set the pending-login cookie on the jar. HttpOnly and session-scoped: the
/// id is the only handle to the server-side `PendingLoginSession`.
pub fn set_pending_login_cookie(jar: CookieJar, value: String, domain: Option<String>) -> CookieJar {
    let mut builder = Cookie::build((PENDING_LOGIN, value))
        .path("/")
        .max_age(Duration::seconds(SESSION_TTL_SECS as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax);
    if let Some(domain) = domain {
        builder = builder.domain(domain);
    }
    jar.add(builder.build())
}

/// Remove the pending-login cookie once verification consumed the session.
pub fn clear_pending_login_cookie(jar: CookieJar, domain: Option<String>) -> CookieJar {
    let mut builder = Cookie::build((PENDING_LOGIN, "")).path("/");
    if let Some(domain) = domain {
        builder = builder.domain(domain);
    }
    jar.remove(builder.build())
}
