//! Redirect Handling
//!
//! The dispatcher follows redirects itself and asks a [`RedirectPolicy`] about
//! every hop. A policy is installed on an `HttpClient` at most once; it caps
//! the number of requests in one chain and copies the caller's original
//! headers onto each redirected request, minus the sensitive ones.

mod attempt;
mod headers;
mod policy;

pub use attempt::{Action, SentRequest};
pub(crate) use headers::make_referer;
pub use headers::propagate_headers;
pub use policy::{HopLimit, RedirectPolicy};

use http::{Method, StatusCode};

/// Whether `status` is one the dispatcher follows when a `Location` is present.
#[must_use]
pub fn is_followed_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Method of the next hop and whether the previous body is replayed.
///
/// 301, 302 and 303 turn anything but GET and HEAD into a bodiless GET,
/// 307 and 308 keep both method and body.
#[must_use]
pub fn next_hop_method(status: StatusCode, method: &Method) -> (Method, bool) {
    match status {
        StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT => (method.clone(), true),
        _ if *method == Method::GET || *method == Method::HEAD => (method.clone(), false),
        _ => (Method::GET, false),
    }
}
