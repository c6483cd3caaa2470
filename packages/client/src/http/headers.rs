//! Header assembly for the original request

use base64::{Engine as _, engine::general_purpose};
use cookie::Cookie;
use http::{HeaderMap, HeaderName, HeaderValue, header};

use crate::error::{self, Error, Result};

/// Fluent builder over `http::HeaderMap`.
///
/// The first invalid name or value is kept and reported by [`HeaderManager::build`];
/// later calls are no-ops once an error is recorded.
#[derive(Debug, Default)]
pub struct HeaderManager {
    headers: HeaderMap,
    error: Option<Error>,
}

impl HeaderManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any previous values.
    #[must_use]
    pub fn set(mut self, key: HeaderName, value: HeaderValue) -> Self {
        if self.error.is_none() {
            self.headers.insert(key, value);
        }
        self
    }

    /// Sets a header from untyped strings.
    #[must_use]
    pub fn set_str(self, key: &str, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => self.set(name, value),
            (Err(e), _) => self.fail(error::builder(e)),
            (_, Err(e)) => self.fail(error::builder(e)),
        }
    }

    /// Sets the Content-Type header.
    #[must_use]
    pub fn content_type(self, content_type: &str) -> Self {
        self.set_str(header::CONTENT_TYPE.as_str(), content_type)
    }

    /// Sets basic authentication.
    #[must_use]
    pub fn basic_auth(self, user: &str, pass: &str) -> Self {
        match basic_auth_value(user, pass) {
            Ok(value) => self.set(header::AUTHORIZATION, value),
            Err(e) => self.fail(e),
        }
    }

    /// Joins `cookies` into a single `Cookie` header. No-op when empty.
    #[must_use]
    pub fn cookies(self, cookies: &[Cookie<'static>]) -> Self {
        if cookies.is_empty() {
            return self;
        }
        let joined = cookies
            .iter()
            .map(|c| c.stripped().to_string())
            .collect::<Vec<_>>()
            .join("; ");
        self.set_str(header::COOKIE.as_str(), &joined)
    }

    /// Returns the assembled headers or the first recorded error.
    pub fn build(self) -> Result<HeaderMap> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.headers),
        }
    }

    fn fail(mut self, e: Error) -> Self {
        self.error.get_or_insert(e);
        self
    }
}

/// `Authorization` value for HTTP basic auth, marked sensitive.
pub fn basic_auth_value(user: &str, pass: &str) -> Result<HeaderValue> {
    let encoded = general_purpose::STANDARD.encode(format!("{user}:{pass}"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}")).map_err(error::builder)?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_is_base64_of_user_colon_pass() {
        let headers = HeaderManager::new()
            .basic_auth("Aladdin", "open sesame")
            .build()
            .expect("headers should build");
        assert_eq!(
            headers[header::AUTHORIZATION],
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
        assert!(headers[header::AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn cookies_share_one_header() {
        let headers = HeaderManager::new()
            .cookies(&[Cookie::new("a", "1"), Cookie::new("b", "two")])
            .build()
            .expect("headers should build");
        assert_eq!(headers.get_all(header::COOKIE).iter().count(), 1);
        assert_eq!(headers[header::COOKIE], "a=1; b=two");
    }

    #[test]
    fn first_invalid_header_is_reported() {
        let err = HeaderManager::new()
            .set_str("bad header", "x")
            .set_str("x-ok", "fine")
            .build()
            .expect_err("invalid name should fail");
        assert!(err.is_builder());
    }

    #[test]
    fn later_values_replace_earlier_ones() {
        let headers = HeaderManager::new()
            .set_str("user-agent", "first")
            .set_str("User-Agent", "second")
            .build()
            .expect("headers should build");
        assert_eq!(headers.get_all(header::USER_AGENT).iter().count(), 1);
        assert_eq!(headers[header::USER_AGENT], "second");
    }
}
