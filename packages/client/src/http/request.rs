//! Original request assembly
//!
//! Turns a URL and [`RequestOptions`] into the first request of a call. Body
//! sources are mutually exclusive and checked in order: raw body, files (with
//! `data` as extra multipart fields), JSON, form data.

use std::collections::BTreeMap;

use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method, Request, Uri, header};
use http_body_util::Full;
use url::Url;

use super::headers::HeaderManager;
use crate::config::{DEFAULT_USER_AGENT, RequestOptions};
use crate::error::{self, Result};
use crate::multipart::Form;

/// Body type of every request this crate sends.
///
/// Bodies are fully buffered so 307/308 redirects can replay them.
pub type RequestBody = Full<Bytes>;

/// Body bytes plus the `Content-Type` they imply, if any.
#[derive(Debug, Default)]
pub(crate) struct EncodedBody {
    pub(crate) bytes: Bytes,
    pub(crate) content_type: Option<String>,
}

/// Parse `url` and check that it is absolute http(s).
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(error::invalid_url)?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        _ => Err(error::url_bad_scheme(parsed)),
    }
}

/// Append `params` to the query string of `url`, keeping existing pairs.
pub fn merge_params(url: &mut Url, params: &[(String, String)]) {
    if params.is_empty() {
        return;
    }
    url.query_pairs_mut().extend_pairs(params);
}

pub(crate) fn to_uri(url: &Url) -> Result<Uri> {
    url.as_str()
        .parse()
        .map_err(|e| error::builder(e).with_url(url.clone()))
}

/// Encode the request body. Upload streams are taken out of `options` and
/// consumed.
pub(crate) async fn encode_body(options: &mut RequestOptions) -> Result<EncodedBody> {
    if let Some(raw) = options.request_body.take() {
        return Ok(EncodedBody {
            bytes: raw,
            content_type: None,
        });
    }

    if !options.files.is_empty() {
        let mut form = Form::new();
        for (name, value) in sorted(&options.data) {
            form = form.text(name, value);
        }
        for upload in std::mem::take(&mut options.files) {
            form = form.file(upload);
        }
        let content_type = form.content_type();
        return Ok(EncodedBody {
            bytes: form.into_body().await?,
            content_type: Some(content_type),
        });
    }

    if let Some(json) = &options.json {
        let bytes = serde_json::to_vec(json).map_err(error::builder)?;
        return Ok(EncodedBody {
            bytes: bytes.into(),
            content_type: Some("application/json".to_string()),
        });
    }

    if !options.data.is_empty() {
        let encoded = serde_urlencoded::to_string(sorted(&options.data)).map_err(error::builder)?;
        return Ok(EncodedBody {
            bytes: encoded.into(),
            content_type: Some("application/x-www-form-urlencoded".to_string()),
        });
    }

    Ok(EncodedBody::default())
}

/// Build the original request of a call.
///
/// Header precedence, later wins: user agent, body content type, caller
/// headers, basic auth, ajax marker, cookies, host override.
pub(crate) async fn build_request(
    method: Method,
    url: &str,
    options: &mut RequestOptions,
) -> Result<(Url, Request<RequestBody>)> {
    let mut url = parse_url(url)?;
    merge_params(&mut url, &options.params);

    let body = encode_body(options).await.map_err(|e| e.or_url(&url))?;

    let mut manager = HeaderManager::new().set_str(
        header::USER_AGENT.as_str(),
        options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
    );
    if let Some(content_type) = &body.content_type {
        manager = manager.content_type(content_type);
    }
    for (name, value) in &options.headers {
        manager = manager.set_str(name, value);
    }
    if let Some((user, pass)) = &options.auth {
        manager = manager.basic_auth(user, pass);
    }
    if options.is_ajax {
        manager = manager.set(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
    }
    manager = manager.cookies(&options.cookies);
    if let Some(host) = &options.host {
        manager = manager.set_str(header::HOST.as_str(), host);
    }
    let headers = manager.build().map_err(|e| e.or_url(&url))?;

    let mut request = Request::builder()
        .method(method)
        .uri(to_uri(&url)?)
        .body(Full::new(body.bytes))
        .map_err(|e| error::builder(e).with_url(url.clone()))?;
    *request.headers_mut() = headers;

    Ok((url, request))
}

fn sorted(data: &std::collections::HashMap<String, String>) -> BTreeMap<&str, &str> {
    data.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}
