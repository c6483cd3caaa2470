//! Core HTTP client implementation
//!
//! An `HttpClient` is a cheap handle over a pooled transport. Clones share the
//! pool, the installed redirect policy and the statistics.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::config::{RedirectDefaults, redirect_defaults};
use crate::connect::Transport;
use crate::error::{self, Result};
use crate::redirect::RedirectPolicy;

use super::configuration::HttpClientBuilder;
use super::stats::{ClientStats, ClientStatsSnapshot};

#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: RwLock<Option<Transport>>,
    redirect_policy: OnceLock<RedirectPolicy>,
    redirect_defaults: Option<Arc<RedirectDefaults>>,
    stats: ClientStats,
}

impl HttpClient {
    /// Client with default transport settings.
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub(crate) fn from_parts(
        transport: Transport,
        redirect_defaults: Option<Arc<RedirectDefaults>>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport: RwLock::new(Some(transport)),
                redirect_policy: OnceLock::new(),
                redirect_defaults,
                stats: ClientStats::new(),
            }),
        }
    }

    /// Install the redirect policy, unless one is already installed.
    ///
    /// Returns the policy in effect for this client, which is the first one
    /// ever installed.
    pub fn install_redirect_policy<F>(&self, make: F) -> &RedirectPolicy
    where
        F: FnOnce() -> RedirectPolicy,
    {
        let mut installed = false;
        let policy = self.inner.redirect_policy.get_or_init(|| {
            installed = true;
            make()
        });
        if !installed {
            tracing::debug!(
                limit = ?policy.limit(),
                "redirect policy already installed on client; keeping it"
            );
        }
        policy
    }

    #[must_use]
    pub fn redirect_policy(&self) -> Option<&RedirectPolicy> {
        self.inner.redirect_policy.get()
    }

    /// Defaults injected through the builder, or a snapshot of the
    /// process-wide defaults.
    #[must_use]
    pub fn redirect_defaults(&self) -> Arc<RedirectDefaults> {
        match &self.inner.redirect_defaults {
            Some(defaults) => Arc::clone(defaults),
            None => redirect_defaults(),
        }
    }

    /// Drop the pooled transport; idle connections are closed and later sends
    /// fail. Returns `false` if the client was already closed.
    pub fn close(&self) -> bool {
        let transport = self
            .inner
            .transport
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if transport.is_some() {
            tracing::debug!("http client closed");
        }
        transport.is_some()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner
            .transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    pub(crate) fn transport(&self) -> Result<Transport> {
        self.inner
            .transport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(error::client_closed)
    }

    pub(crate) fn stats_ref(&self) -> &ClientStats {
        &self.inner.stats
    }

    #[must_use]
    pub fn stats(&self) -> ClientStatsSnapshot {
        self.inner.stats.snapshot()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("closed", &self.is_closed())
            .field("redirect_policy", &self.redirect_policy())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::HopLimit;
    use std::collections::HashSet;

    fn policy(limit: i32) -> RedirectPolicy {
        RedirectPolicy::new(limit, &HashSet::new(), &RedirectDefaults::default())
    }

    #[test]
    fn first_installed_policy_sticks() {
        let client = HttpClient::new().expect("client should build");
        assert!(client.redirect_policy().is_none());

        assert_eq!(client.install_redirect_policy(|| policy(2)).limit(), HopLimit::Max(2));
        assert_eq!(client.install_redirect_policy(|| policy(7)).limit(), HopLimit::Max(2));

        let clone = client.clone();
        assert_eq!(clone.install_redirect_policy(|| policy(-1)).limit(), HopLimit::Max(2));
    }

    #[test]
    fn close_is_idempotent_and_shared_by_clones() {
        let client = HttpClient::new().expect("client should build");
        let clone = client.clone();

        assert!(!client.is_closed());
        assert!(client.close());
        assert!(!client.close());
        assert!(clone.is_closed());
        assert!(clone.transport().expect_err("closed").is_closed());
    }

    #[test]
    fn injected_defaults_take_precedence() {
        let client = HttpClient::builder()
            .redirect_defaults(RedirectDefaults::default().with_limit(4))
            .build()
            .expect("client should build");
        assert_eq!(client.redirect_defaults().limit, 4);
    }
}
