//! One-shot notices carried across a redirect in a short-lived cookie.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub(crate) const FLASH_COOKIE: &str = "campus_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Reads the pending notice from the request cookies, if any.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == FLASH_COOKIE && !value.is_empty())
            .and_then(|(_, value)| match serde_urlencoded::from_str(value) {
                Ok(flash) => Some(flash),
                Err(err) => {
                    debug!(%err, "ignoring unreadable flash cookie");
                    None
                }
            })
    }

    fn set_cookie(&self) -> Option<HeaderValue> {
        let encoded = serde_urlencoded::to_string(self).ok()?;
        HeaderValue::from_str(&format!(
            "{FLASH_COOKIE}={encoded}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax"
        ))
        .ok()
    }

    pub(crate) fn clear_cookie() -> HeaderValue {
        HeaderValue::from_static("campus_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
    }

    /// 303 redirect that leaves this notice for the next page.
    pub fn redirect(self, to: &str) -> Response {
        let mut response = Redirect::to(to).into_response();
        if let Some(cookie) = self.set_cookie() {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn redirect_round_trips_through_the_cookie_header() {
        let response = Flash::success("Secteur ajouté avec succès !").redirect("/sectors");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/sectors");

        let set_cookie = response.headers()[header::SET_COOKIE]
            .to_str()
            .expect("ascii cookie");
        let pair = set_cookie.split(';').next().expect("name=value");

        let mut request_headers = HeaderMap::new();
        request_headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {pair}")).expect("valid header"),
        );
        let flash = Flash::from_headers(&request_headers).expect("flash present");
        assert_eq!(flash, Flash::success("Secteur ajouté avec succès !"));
    }

    #[test]
    fn cleared_or_garbled_cookies_yield_nothing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("campus_flash="));
        assert!(Flash::from_headers(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("campus_flash=level=loud"));
        assert!(Flash::from_headers(&headers).is_none());
    }
}
