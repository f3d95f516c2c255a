use anyhow::Context;
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};

use crate::types::SessionUser;

pub const SESSION_COOKIE: &str = "session";

/// Store the user in an encrypted session cookie.
pub fn login(jar: PrivateCookieJar, user: &SessionUser) -> anyhow::Result<PrivateCookieJar> {
    let value = serde_json::to_string(user).context("Failed to encode session")?;

    let cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok(jar.add(cookie))
}

pub fn logout(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Missing, tampered and undecodable cookies all read as logged out.
pub fn current_user(jar: &PrivateCookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    match serde_json::from_str(cookie.value()) {
        Ok(user) => Some(user),
        Err(err) => {
            tracing::debug!("Discarding undecodable session: {:?}", err);
            None
        }
    }
}
