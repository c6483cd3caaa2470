//! Connection layer
//!
//! Builds the pooled hyper-util clients a [`crate::HttpClient`] sends through:
//! one direct client plus one CONNECT-tunnel client per proxied scheme, all
//! behind rustls with separate dial and TLS-handshake deadlines.

mod deadline;
mod proxy;

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use http::Request;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::connect::proxy::Tunnel;
use hyper_util::client::legacy::{Client, ResponseFuture};
use hyper_util::rt::{TokioExecutor, TokioTimer};
use url::Url;

pub(crate) use deadline::{ConnectDeadline, Dialed};

use crate::config::TimeoutConfig;
use crate::error::{self, Result};
use crate::http::request::RequestBody;
use crate::tls;

type DirectClient = Client<ConnectDeadline<HttpsConnector<Dialed<HttpConnector>>>, RequestBody>;
type TunnelClient =
    Client<ConnectDeadline<HttpsConnector<Dialed<Tunnel<HttpConnector>>>>, RequestBody>;

/// Transport-level settings, taken from the options that built the client.
#[derive(Debug, Clone)]
pub(crate) struct TransportConfig {
    pub(crate) proxies: HashMap<String, Url>,
    pub(crate) insecure_skip_verify: bool,
    pub(crate) timeouts: TimeoutConfig,
    pub(crate) local_addr: Option<IpAddr>,
    pub(crate) pool_idle_timeout: Duration,
    pub(crate) pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            proxies: HashMap::new(),
            insecure_skip_verify: false,
            timeouts: TimeoutConfig::default(),
            local_addr: None,
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 32,
        }
    }
}

/// Pooled clients for one [`crate::HttpClient`].
#[derive(Clone)]
pub(crate) struct Transport {
    direct: DirectClient,
    tunnels: HashMap<String, TunnelClient>,
}

impl Transport {
    pub(crate) fn build(config: &TransportConfig) -> Result<Self> {
        let tls = tls::client_config(config.insecure_skip_verify).map_err(error::builder)?;
        let TimeoutConfig { dial, tls_handshake, .. } = config.timeouts;

        let https = HttpsConnectorBuilder::new()
            .with_tls_config((*tls).clone())
            .https_or_http()
            .enable_http1()
            .wrap_connector(Dialed::new(http_connector(config)));
        let direct = pooled(config).build(ConnectDeadline::new(https, dial, tls_handshake));

        let mut tunnels = HashMap::with_capacity(config.proxies.len());
        for (scheme, proxy_url) in &config.proxies {
            let tunnel = proxy::tunnel(proxy_url, http_connector(config))?;
            let https = HttpsConnectorBuilder::new()
                .with_tls_config((*tls).clone())
                .https_or_http()
                .enable_http1()
                .wrap_connector(Dialed::new(tunnel));
            let client = pooled(config).build(ConnectDeadline::new(https, dial, tls_handshake));
            tracing::debug!(scheme = %scheme, proxy = %proxy::redacted(proxy_url), "proxy configured");
            tunnels.insert(scheme.to_ascii_lowercase(), client);
        }

        Ok(Self { direct, tunnels })
    }

    pub(crate) fn send(&self, request: Request<RequestBody>) -> ResponseFuture {
        let scheme = request.uri().scheme_str().unwrap_or("http");
        match self.tunnels.get(scheme) {
            Some(client) => client.request(request),
            None => self.direct.request(request),
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("proxied_schemes", &self.tunnels.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn http_connector(config: &TransportConfig) -> HttpConnector {
    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_nodelay(true);
    http.set_connect_timeout(Some(config.timeouts.dial));
    http.set_keepalive(Some(config.timeouts.keep_alive));
    http.set_local_address(config.local_addr);
    http
}

fn pooled(config: &TransportConfig) -> hyper_util::client::legacy::Builder {
    let mut builder = Client::builder(TokioExecutor::new());
    builder
        .pool_timer(TokioTimer::new())
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host);
    builder
}
