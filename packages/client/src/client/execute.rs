//! Request dispatch
//!
//! One call: build the original request, resolve and install the redirect
//! policy, then send hop after hop until a response is final.

use http::header::{CONTENT_TYPE, LOCATION, REFERER};
use http::{Method, Request, Response};
use http_body::Body as _;
use hyper::body::Incoming;
use url::Url;

use super::configuration::HttpClientBuilder;
use super::core::HttpClient;
use super::guard::CallGuard;
use crate::config::{RequestOptions, TimeoutConfig, Validator};
use crate::connect::Transport;
use crate::error::{self, Result};
use crate::http::compression;
use crate::http::request::{RequestBody, build_request, parse_url, to_uri};
use crate::http::response::HttpResponse;
use crate::redirect::{
    Action, HopLimit, RedirectPolicy, SentRequest, is_followed_status, make_referer, next_hop_method,
};

/// Send one request and follow redirects according to `options`.
///
/// `None` behaves exactly like `Some(RequestOptions::default())`.
pub async fn send_request(
    method: Method,
    url: &str,
    options: Option<RequestOptions>,
) -> Result<HttpResponse> {
    let mut options = options.unwrap_or_default();
    options.validate().map_err(error::configuration)?;

    let client = match options.http_client.take() {
        Some(client) => {
            warn_ignored_transport_settings(&options);
            client
        }
        None => HttpClientBuilder::from_options(&options).build()?,
    };

    let defaults = client.redirect_defaults();
    let policy = client
        .install_redirect_policy(|| RedirectPolicy::from_options(&options, &defaults))
        .clone();
    let guard = CallGuard::new(
        TimeoutConfig::from_options(&options).request,
        options.cancellation.clone(),
    );

    client.stats_ref().record_request();
    let result = dispatch(&client, &policy, guard, method, url, &mut options).await;
    match &result {
        Ok(response) if response.ok() => client.stats_ref().record_success(),
        _ => client.stats_ref().record_failure(),
    }
    result
}

async fn dispatch(
    client: &HttpClient,
    policy: &RedirectPolicy,
    guard: CallGuard,
    method: Method,
    url: &str,
    options: &mut RequestOptions,
) -> Result<HttpResponse> {
    let (mut url, mut request) = guard.run(build_request(method, url, options)).await??;

    if let Some(hook) = options.before_request.clone() {
        hook(&mut request).map_err(|e| error::builder(e).with_url(url.clone()))?;
        url = parse_url(&request.uri().to_string())?;
    }

    let transport = client.transport().map_err(|e| e.with_url(url.clone()))?;
    let mut via: Vec<SentRequest> = Vec::new();

    loop {
        let method = request.method().clone();
        let body = request.body().clone();
        via.push(SentRequest::new(method.clone(), url.clone(), request.headers()));

        let decode_gzip =
            compression::request_gzip(request.headers_mut(), options.disable_compression);
        let response = send_hop(&transport, &guard, request, &url, client).await?;
        let status = response.status();

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            hop = via.len(),
            "response received"
        );

        if !is_followed_status(status) || !response.headers().contains_key(LOCATION) {
            return Ok(HttpResponse::new(response, url, decode_gzip, guard));
        }
        if policy.limit() == HopLimit::UseLastResponse {
            tracing::debug!(url = %url, "redirects disabled; returning redirect response");
            return Ok(HttpResponse::new(response, url, decode_gzip, guard));
        }

        let next_url = redirect_target(&response, &url)?;

        if !matches!(next_url.scheme(), "http" | "https") {
            return Err(error::url_bad_scheme(next_url));
        }

        let (next_method, keep_body) = next_hop_method(status, &method);
        let mut next = Request::builder()
            .method(next_method)
            .uri(to_uri(&next_url)?)
            .body(if keep_body { body } else { RequestBody::default() })
            .map_err(|e| error::builder(e).with_url(next_url.clone()))?;
        if let Some(referer) = make_referer(&next_url, &url) {
            next.headers_mut().insert(REFERER, referer);
        }

        match policy.check(&mut next, &via) {
            Action::Follow => {
                if !keep_body {
                    next.headers_mut().remove(CONTENT_TYPE);
                }
                tracing::debug!(from = %url, to = %next_url, "following redirect");
                client.stats_ref().record_redirect();
                request = next;
                url = next_url;
            }
            Action::Stop => {
                tracing::debug!(url = %url, "redirects disabled; returning redirect response");
                return Ok(HttpResponse::new(response, url, decode_gzip, guard));
            }
            Action::Error(e) => return Err(e.with_url(next_url)),
        }
    }
}

async fn send_hop(
    transport: &Transport,
    guard: &CallGuard,
    request: Request<RequestBody>,
    url: &Url,
    client: &HttpClient,
) -> Result<Response<Incoming>> {
    if let Some(len) = request.body().size_hint().exact() {
        client.stats_ref().record_bytes_sent(len);
    }
    guard
        .run(transport.send(request))
        .await
        .map_err(|e| e.with_url(url.clone()))?
        .map_err(|e| error::transport(e).with_url(url.clone()))
}

/// Resolve the `Location` of a followed redirect against the current URL.
fn redirect_target(response: &Response<Incoming>, current: &Url) -> Result<Url> {
    let location = response
        .headers()
        .get(LOCATION)
        .ok_or_else(|| error::redirect("missing Location header", current.clone()))?;
    let location = location
        .to_str()
        .map_err(|e| error::redirect(e, current.clone()))?;
    current
        .join(location)
        .map_err(|e| error::redirect(e, current.clone()))
}

fn warn_ignored_transport_settings(options: &RequestOptions) {
    let ignored = !options.proxies.is_empty()
        || options.insecure_skip_verify
        || options.local_addr.is_some()
        || !options.dial_timeout.is_zero()
        || !options.dial_keep_alive.is_zero()
        || !options.tls_handshake_timeout.is_zero();
    if ignored {
        tracing::warn!("transport settings in request options are ignored when a client is supplied");
    }
}

