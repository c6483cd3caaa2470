//! Per-call request options
//!
//! `RequestOptions` is a plain configuration bag: every field is public and a
//! default value means "not set". Passing no options to a verb function is the
//! same as passing `RequestOptions::default()`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use cookie::Cookie;
use http::HeaderName;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::client::HttpClient;
use crate::http::request::RequestBody;
use crate::multipart::FileUpload;

/// Hook run against the fully built original request right before it is sent.
///
/// Returning an error aborts the call with a builder error.
pub type BeforeRequestHook = Arc<
    dyn Fn(&mut http::Request<RequestBody>) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
        + Send
        + Sync,
>;

/// Everything about one outgoing call.
#[derive(Default)]
pub struct RequestOptions {
    /// Form fields. Sent as `application/x-www-form-urlencoded`, or as
    /// multipart fields when `files` is not empty.
    pub data: HashMap<String, String>,

    /// Query parameters merged into the URL, in order.
    pub params: Vec<(String, String)>,

    /// Files sent as `multipart/form-data`.
    pub files: Vec<FileUpload>,

    /// JSON body, sent with `Content-Type: application/json`.
    pub json: Option<serde_json::Value>,

    /// Raw body. Takes precedence over files, JSON and form data.
    pub request_body: Option<Bytes>,

    /// Headers set on the original request, replacing any library default.
    pub headers: HashMap<String, String>,

    /// Disables TLS certificate and host name verification.
    pub insecure_skip_verify: bool,

    /// Do not request gzip and do not decode gzip response bodies.
    pub disable_compression: bool,

    /// Defaults to [`crate::config::DEFAULT_USER_AGENT`].
    pub user_agent: Option<String>,

    /// `Host` header override for the original request only.
    pub host: Option<String>,

    /// HTTP basic auth as `(user, password)`.
    pub auth: Option<(String, String)>,

    /// Adds `X-Requested-With: XMLHttpRequest`.
    pub is_ajax: bool,

    pub cookies: Vec<Cookie<'static>>,

    /// Proxy URL per request scheme (`http` or `https`).
    pub proxies: HashMap<String, Url>,

    pub tls_handshake_timeout: Duration,
    pub dial_timeout: Duration,
    pub dial_keep_alive: Duration,
    pub request_timeout: Duration,

    pub local_addr: Option<IpAddr>,

    /// Send through this client instead of a client built from these options.
    /// Transport fields (proxies, TLS, dial settings) are then ignored.
    pub http_client: Option<HttpClient>,

    /// Headers withheld from redirected requests. Empty means the default set.
    pub sensitive_http_headers: HashSet<HeaderName>,

    /// Negative: never follow redirects and return the redirect response.
    /// Zero: use the default limit. Positive: maximum requests in one chain.
    pub redirect_limit: i32,

    pub before_request: Option<BeforeRequestHook>,

    /// Aborts the call, including in the middle of a redirect chain.
    pub cancellation: Option<CancellationToken>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.request_body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: FileUpload) -> Self {
        self.files.push(file);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((user.into(), password.into()));
        self
    }

    #[must_use]
    pub fn with_ajax(mut self, is_ajax: bool) -> Self {
        self.is_ajax = is_ajax;
        self
    }

    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, scheme: impl Into<String>, proxy: Url) -> Self {
        self.proxies.insert(scheme.into(), proxy);
        self
    }

    #[must_use]
    pub fn with_insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.insecure_skip_verify = insecure;
        self
    }

    #[must_use]
    pub fn with_disable_compression(mut self, disable: bool) -> Self {
        self.disable_compression = disable;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_dial_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_dial_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.dial_keep_alive = keep_alive;
        self
    }

    #[must_use]
    pub fn with_tls_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.tls_handshake_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_local_addr(mut self, addr: IpAddr) -> Self {
        self.local_addr = Some(addr);
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Add a header name to the per-call sensitive set.
    ///
    /// Names that are not valid header names are skipped with a warning.
    #[must_use]
    pub fn with_sensitive_header(mut self, name: &str) -> Self {
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => {
                self.sensitive_http_headers.insert(name);
            }
            Err(e) => tracing::warn!(name, error = %e, "ignoring invalid sensitive header name"),
        }
        self
    }

    #[must_use]
    pub fn with_redirect_limit(mut self, limit: i32) -> Self {
        self.redirect_limit = limit;
        self
    }

    #[must_use]
    pub fn with_before_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut http::Request<RequestBody>) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
            + Send
            + Sync
            + 'static,
    {
        self.before_request = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("data", &self.data)
            .field("params", &self.params)
            .field("files", &self.files)
            .field("json", &self.json)
            .field("request_body", &self.request_body.as_ref().map(Bytes::len))
            .field("headers", &self.headers)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("disable_compression", &self.disable_compression)
            .field("user_agent", &self.user_agent)
            .field("host", &self.host)
            .field("auth", &self.auth.as_ref().map(|(user, _)| user))
            .field("is_ajax", &self.is_ajax)
            .field("cookies", &self.cookies.len())
            .field("proxies", &self.proxies)
            .field("tls_handshake_timeout", &self.tls_handshake_timeout)
            .field("dial_timeout", &self.dial_timeout)
            .field("dial_keep_alive", &self.dial_keep_alive)
            .field("request_timeout", &self.request_timeout)
            .field("local_addr", &self.local_addr)
            .field("http_client", &self.http_client.is_some())
            .field("sensitive_http_headers", &self.sensitive_http_headers)
            .field("redirect_limit", &self.redirect_limit)
            .field("before_request", &self.before_request.is_some())
            .field("cancellation", &self.cancellation.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_header_names_are_normalised() {
        let options = RequestOptions::new()
            .with_sensitive_header("X-Api-Key")
            .with_sensitive_header("bad header");

        assert_eq!(options.sensitive_http_headers.len(), 1);
        assert!(
            options
                .sensitive_http_headers
                .contains(&HeaderName::from_static("x-api-key"))
        );
    }
}
