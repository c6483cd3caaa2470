//! Transparent gzip handling
//!
//! The transport asks for gzip on the caller's behalf and decodes the reply.
//! When the caller sets `Accept-Encoding` itself, bodies are passed through
//! untouched.

use std::io::Read;

use flate2::read::GzDecoder;
use http::{HeaderMap, HeaderValue, header};

use crate::error::{self, Result};

const GZIP: &str = "gzip";

/// Adds `Accept-Encoding: gzip` unless the request already names an encoding.
///
/// Returns whether the response should be decoded by this layer.
pub(crate) fn request_gzip(headers: &mut HeaderMap, disabled: bool) -> bool {
    if disabled || headers.contains_key(header::ACCEPT_ENCODING) {
        return false;
    }
    headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(GZIP));
    true
}

/// Whether the response body is gzip-encoded.
pub(crate) fn is_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(GZIP))
}

pub(crate) fn decompress_gzip(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::with_capacity(data.len().saturating_mul(2));
    decoder.read_to_end(&mut out).map_err(error::decode)?;
    Ok(out)
}
