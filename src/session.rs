use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::convert::Infallible;

pub const SESSION_COOKIE: &str = "session_id";

/// Which record a request works on. Browsers without a session cookie share
/// the configured default key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub key: String,
    pub is_new: bool,
}

impl Session {
    pub fn from_jar(jar: &CookieJar, default_key: &str) -> Self {
        match jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().trim())
            .filter(|value| !value.is_empty())
        {
            Some(key) => Self {
                key: key.to_string(),
                is_new: false,
            },
            None => Self {
                key: default_key.to_string(),
                is_new: true,
            },
        }
    }

    /// Adds the session cookie to `jar` if the browser did not send one.
    pub fn remember(&self, jar: CookieJar) -> CookieJar {
        if !self.is_new {
            return jar;
        }
        jar.add(
            Cookie::build((SESSION_COOKIE, self.key.clone()))
                .path("/")
                .http_only(true),
        )
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self::from_jar(&jar, &state.default_session))
    }
}
