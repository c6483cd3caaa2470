//! HTTP client configuration and construction

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::HttpClient;
use crate::config::validation::validate_proxy;
use crate::config::{RedirectDefaults, RequestOptions, TimeoutConfig};
use crate::connect::{Transport, TransportConfig};
use crate::error::{self, Result};

/// HTTP client builder for configuration
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    transport: TransportConfig,
    redirect_defaults: Option<Arc<RedirectDefaults>>,
}

impl HttpClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport settings of a per-call client: proxies, TLS verification,
    /// dial timeouts and local address.
    #[must_use]
    pub fn from_options(options: &RequestOptions) -> Self {
        let mut builder = Self::new()
            .insecure_skip_verify(options.insecure_skip_verify)
            .timeouts(TimeoutConfig::from_options(options))
            .local_address(options.local_addr);
        for (scheme, proxy) in &options.proxies {
            builder = builder.proxy(scheme.clone(), proxy.clone());
        }
        builder
    }

    /// Route requests of `scheme` (`http` or `https`) through a CONNECT
    /// tunnel to `proxy`. Credentials in the URL become `Proxy-Authorization`.
    #[must_use]
    pub fn proxy(mut self, scheme: impl Into<String>, proxy: Url) -> Self {
        self.transport.proxies.insert(scheme.into(), proxy);
        self
    }

    #[must_use]
    pub fn insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.transport.insecure_skip_verify = insecure;
        self
    }

    #[must_use]
    pub fn timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.transport.timeouts = timeouts;
        self
    }

    #[must_use]
    pub fn dial_timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeouts.dial = timeout;
        self
    }

    #[must_use]
    pub fn dial_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.transport.timeouts.keep_alive = keep_alive;
        self
    }

    #[must_use]
    pub fn tls_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeouts.tls_handshake = timeout;
        self
    }

    #[must_use]
    pub fn local_address(mut self, addr: Option<IpAddr>) -> Self {
        self.transport.local_addr = addr;
        self
    }

    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.transport.pool_idle_timeout = timeout;
        self
    }

    #[must_use]
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.transport.pool_max_idle_per_host = max;
        self
    }

    /// Redirect defaults for calls through this client, used instead of the
    /// process-wide [`crate::redirect_defaults`].
    #[must_use]
    pub fn redirect_defaults(mut self, defaults: RedirectDefaults) -> Self {
        self.redirect_defaults = Some(Arc::new(defaults));
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        for (scheme, proxy) in &self.transport.proxies {
            validate_proxy(scheme, proxy).map_err(error::configuration)?;
        }
        let transport = Transport::build(&self.transport)?;
        Ok(HttpClient::from_parts(transport, self.redirect_defaults))
    }
}
