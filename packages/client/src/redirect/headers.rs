//! Header manipulation utilities for redirects

use std::collections::HashSet;

use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Append every header of `original` onto `next`, skipping names in `sensitive`.
///
/// Values already on `next` are kept; multi-valued headers arrive with all of
/// their values in order.
pub fn propagate_headers(original: &HeaderMap, next: &mut HeaderMap, sensitive: &HashSet<HeaderName>) {
    for (name, value) in original {
        if sensitive.contains(name) {
            continue;
        }
        next.append(name.clone(), value.clone());
    }
}

/// Create a referer header value from previous URL, handling HTTPS->HTTP downgrade
pub(crate) fn make_referer(next: &Url, previous: &Url) -> Option<HeaderValue> {
    if next.scheme() == "http" && previous.scheme() == "https" {
        return None;
    }

    let mut referer = previous.clone();
    let _ = referer.set_username("");
    let _ = referer.set_password(None);
    referer.set_fragment(None);
    referer.as_str().parse().ok()
}
