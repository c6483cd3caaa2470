//! CONNECT tunnel setup for per-scheme proxies.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderValue, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::connect::proxy::Tunnel;
use url::Url;

use crate::error::{self, Result};

pub(super) fn tunnel(proxy: &Url, http: HttpConnector) -> Result<Tunnel<HttpConnector>> {
    let dst: Uri = redacted(proxy)
        .as_str()
        .parse()
        .map_err(|e| error::builder(e).with_url(proxy.clone()))?;

    let tunnel = Tunnel::new(dst, http);
    match basic_credentials(proxy) {
        Some(auth) => Ok(tunnel.with_auth(auth)),
        None => Ok(tunnel),
    }
}

/// The proxy URL without user info.
pub(super) fn redacted(proxy: &Url) -> Url {
    let mut url = proxy.clone();
    let _ = url.set_username("");
    let _ = url.set_password(None);
    url
}

fn basic_credentials(proxy: &Url) -> Option<HeaderValue> {
    if proxy.username().is_empty() && proxy.password().is_none() {
        return None;
    }
    let raw = format!("{}:{}", proxy.username(), proxy.password().unwrap_or(""));
    let mut value = HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(raw))).ok()?;
    value.set_sensitive(true);
    Some(value)
}
