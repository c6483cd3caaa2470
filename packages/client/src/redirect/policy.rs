//! Redirect policy
//!
//! A `RedirectPolicy` is resolved once per call from the call's options and a
//! snapshot of the redirect defaults, and is never mutated afterwards.

use std::collections::HashSet;
use std::sync::Arc;

use http::{HeaderName, Request};

use super::attempt::{Action, SentRequest};
use super::headers::propagate_headers;
use crate::config::{RedirectDefaults, RequestOptions};
use crate::error;

/// How many requests a redirect chain may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopLimit {
    /// Never follow; the redirect response is the result of the call.
    UseLastResponse,
    /// Fail once the chain already holds this many requests.
    Max(usize),
}

impl HopLimit {
    /// Negative disables following, zero defers to `default`, positive is a cap.
    ///
    /// A non-positive `default` leaves no room for any redirect.
    #[must_use]
    pub fn resolve(limit: i32, default: i32) -> Self {
        match limit {
            l if l < 0 => HopLimit::UseLastResponse,
            0 => HopLimit::Max(usize::try_from(default).unwrap_or(0)),
            l => HopLimit::Max(usize::try_from(l).unwrap_or(usize::MAX)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    limit: HopLimit,
    sensitive_headers: Arc<HashSet<HeaderName>>,
}

impl RedirectPolicy {
    /// Resolve a policy from raw settings. An empty `sensitive_headers` set
    /// falls back to the defaults' set.
    #[must_use]
    pub fn new(
        limit: i32,
        sensitive_headers: &HashSet<HeaderName>,
        defaults: &RedirectDefaults,
    ) -> Self {
        let sensitive_headers = if sensitive_headers.is_empty() {
            defaults.sensitive_headers.clone()
        } else {
            sensitive_headers.clone()
        };

        Self {
            limit: HopLimit::resolve(limit, defaults.limit),
            sensitive_headers: Arc::new(sensitive_headers),
        }
    }

    #[must_use]
    pub fn from_options(options: &RequestOptions, defaults: &RedirectDefaults) -> Self {
        Self::new(
            options.redirect_limit,
            &options.sensitive_http_headers,
            defaults,
        )
    }

    #[must_use]
    pub fn limit(&self) -> HopLimit {
        self.limit
    }

    #[must_use]
    pub fn sensitive_headers(&self) -> &HashSet<HeaderName> {
        &self.sensitive_headers
    }

    /// Decide what happens with the hop about to send `next`.
    ///
    /// `via` holds the requests already sent, oldest first. On `Follow` the
    /// non-sensitive headers of `via[0]` have been appended to `next`.
    pub fn check<B>(&self, next: &mut Request<B>, via: &[SentRequest]) -> Action {
        let max = match self.limit {
            HopLimit::UseLastResponse => return Action::Stop,
            HopLimit::Max(max) => max,
        };

        if via.len() >= max {
            return Action::Error(error::redirect_limit_exceeded());
        }

        if let Some(original) = via.first() {
            propagate_headers(&original.headers, next.headers_mut(), &self.sensitive_headers);
        }

        Action::Follow
    }
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self::new(0, &HashSet::new(), &RedirectDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{AUTHORIZATION, COOKIE};
    use http::{HeaderMap, HeaderValue, Method};
    use url::Url;

    fn chain(len: usize) -> Vec<SentRequest> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("secret"));
        headers.insert("x-trace", HeaderValue::from_static("abc"));
        (0..len)
            .map(|i| {
                let url = Url::parse(&format!("http://a.b/c/{i}")).expect("test URL should parse");
                SentRequest::new(Method::GET, url, &headers)
            })
            .collect()
    }

    fn next_request() -> Request<()> {
        Request::builder()
            .uri("http://x.y/z")
            .body(())
            .expect("test request should build")
    }

    #[test]
    fn limit_counts_requests_already_sent() {
        let policy = RedirectPolicy::new(3, &HashSet::new(), &RedirectDefaults::default());

        assert!(policy.check(&mut next_request(), &chain(1)).is_follow());
        assert!(policy.check(&mut next_request(), &chain(2)).is_follow());

        match policy.check(&mut next_request(), &chain(3)) {
            Action::Error(err) => assert!(err.is_redirect_limit_exceeded()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn zero_limit_uses_default() {
        let defaults = RedirectDefaults::default().with_limit(2);
        let deferred = RedirectPolicy::new(0, &HashSet::new(), &defaults);
        let explicit = RedirectPolicy::new(2, &HashSet::new(), &defaults);

        assert_eq!(deferred.limit(), explicit.limit());
        assert!(deferred.check(&mut next_request(), &chain(1)).is_follow());
        assert!(matches!(
            deferred.check(&mut next_request(), &chain(2)),
            Action::Error(_)
        ));
    }

    #[test]
    fn negative_limit_stops_without_copying_headers() {
        let policy = RedirectPolicy::new(-1, &HashSet::new(), &RedirectDefaults::default());

        for len in [1, 5, 100] {
            let mut next = next_request();
            assert!(policy.check(&mut next, &chain(len)).is_stop());
            assert!(next.headers().is_empty());
        }
    }

    #[test]
    fn sensitive_headers_are_withheld() {
        let policy = RedirectPolicy::default();
        let mut next = next_request();

        assert!(policy.check(&mut next, &chain(1)).is_follow());
        assert_eq!(next.headers().get("x-trace").map(HeaderValue::as_bytes), Some(&b"abc"[..]));
        assert!(next.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn custom_sensitive_set_replaces_default() {
        let sensitive: HashSet<HeaderName> = [HeaderName::from_static("x-trace")].into_iter().collect();
        let policy = RedirectPolicy::new(0, &sensitive, &RedirectDefaults::default());
        let mut next = next_request();

        assert!(policy.check(&mut next, &chain(1)).is_follow());
        assert!(next.headers().get("x-trace").is_none());
        assert_eq!(next.headers().get(AUTHORIZATION).map(HeaderValue::as_bytes), Some(&b"secret"[..]));
        assert!(!policy.sensitive_headers().contains(&COOKIE));
    }

    #[test]
    fn only_the_first_request_is_a_header_source() {
        let policy = RedirectPolicy::default();
        let mut via = chain(1);
        let mut later = HeaderMap::new();
        later.insert("x-hop", HeaderValue::from_static("2"));
        via.push(SentRequest::new(
            Method::GET,
            Url::parse("http://a.b/hop").expect("test URL should parse"),
            &later,
        ));

        let mut next = next_request();
        assert!(policy.check(&mut next, &via).is_follow());
        assert!(next.headers().get("x-hop").is_none());
        assert_eq!(next.headers().get_all("x-trace").iter().count(), 1);
    }
}
