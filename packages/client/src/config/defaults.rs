//! Process-wide redirect defaults
//!
//! The fallback redirect limit and sensitive-header set live behind a lock and
//! are handed out as `Arc` snapshots. A call captures one snapshot when it
//! starts, so replacing the defaults never changes the policy of a call that
//! is already in flight.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use http::HeaderName;
use http::header::{AUTHORIZATION, PROXY_AUTHORIZATION, WWW_AUTHENTICATE};

/// Number of requests a redirect chain may contain when neither the call nor
/// the client overrides it.
pub const DEFAULT_REDIRECT_LIMIT: i32 = 30;

static GLOBAL_REDIRECT_DEFAULTS: LazyLock<RwLock<Arc<RedirectDefaults>>> =
    LazyLock::new(|| RwLock::new(Arc::new(RedirectDefaults::default())));

/// Fallback redirect configuration used when a call leaves its own unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDefaults {
    /// Limit applied when a call's `redirect_limit` is zero.
    pub limit: i32,
    /// Headers withheld from redirected requests when a call's set is empty.
    pub sensitive_headers: HashSet<HeaderName>,
}

impl Default for RedirectDefaults {
    fn default() -> Self {
        Self {
            limit: DEFAULT_REDIRECT_LIMIT,
            sensitive_headers: default_sensitive_headers(),
        }
    }
}

impl RedirectDefaults {
    #[must_use]
    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = limit;
        self
    }

    /// Replace the sensitive-header set. Names are normalized by `HeaderName`,
    /// so membership is case-insensitive.
    #[must_use]
    pub fn with_sensitive_headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = HeaderName>,
    {
        self.sensitive_headers = headers.into_iter().collect();
        self
    }
}

/// `WWW-Authenticate`, `Authorization` and `Proxy-Authorization`.
#[must_use]
pub fn default_sensitive_headers() -> HashSet<HeaderName> {
    [WWW_AUTHENTICATE, AUTHORIZATION, PROXY_AUTHORIZATION]
        .into_iter()
        .collect()
}

/// Snapshot of the current process-wide redirect defaults.
#[must_use]
pub fn redirect_defaults() -> Arc<RedirectDefaults> {
    GLOBAL_REDIRECT_DEFAULTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide redirect defaults, returning the previous snapshot.
///
/// Calls that already started keep the snapshot they captured.
pub fn set_redirect_defaults(defaults: RedirectDefaults) -> Arc<RedirectDefaults> {
    let mut guard = GLOBAL_REDIRECT_DEFAULTS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, Arc::new(defaults))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_matches_case_insensitively() {
        let defaults = RedirectDefaults::default();
        assert_eq!(defaults.limit, 30);

        for name in ["Authorization", "WWW-AUTHENTICATE", "proxy-authorization"] {
            let name = HeaderName::from_bytes(name.as_bytes()).expect("valid header name");
            assert!(defaults.sensitive_headers.contains(&name), "{name} should be sensitive");
        }

        let cookie = HeaderName::from_static("cookie");
        assert!(!defaults.sensitive_headers.contains(&cookie));
    }

    #[test]
    fn builder_methods_replace_fields() {
        let defaults = RedirectDefaults::default()
            .with_limit(4)
            .with_sensitive_headers([HeaderName::from_static("x-api-key")]);

        assert_eq!(defaults.limit, 4);
        assert_eq!(defaults.sensitive_headers.len(), 1);
        assert!(!defaults.sensitive_headers.contains(&AUTHORIZATION));
    }
}
