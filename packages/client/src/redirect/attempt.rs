//! Redirect chain entries and policy decisions

use http::{HeaderMap, Method, header::HOST};
use url::Url;

/// A request that has already been sent in the current redirect chain.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl SentRequest {
    /// Record a request for the chain.
    ///
    /// `Host` is not recorded: it names the server of this hop and must never
    /// travel to the next one.
    #[must_use]
    pub fn new(method: Method, url: Url, headers: &HeaderMap) -> Self {
        let mut headers = headers.clone();
        headers.remove(HOST);
        Self {
            method,
            url,
            headers,
        }
    }
}

/// What the dispatcher does with a redirect response.
#[derive(Debug)]
pub enum Action {
    /// Send the next request.
    Follow,
    /// Return the redirect response to the caller as-is.
    Stop,
    /// Fail the call.
    Error(crate::Error),
}

impl Action {
    #[must_use]
    pub fn is_follow(&self) -> bool {
        matches!(self, Action::Follow)
    }

    #[must_use]
    pub fn is_stop(&self) -> bool {
        matches!(self, Action::Stop)
    }
}
