//! # courier
//!
//! Verb-named HTTP calls. Each function takes a URL and optional
//! [`RequestOptions`], sends the request (following redirects within the
//! configured limit) and returns an [`HttpResponse`].
//!
//! ```no_run
//! # async fn run() -> courier::Result<()> {
//! let options = courier::RequestOptions::new()
//!     .with_json(serde_json::json!({ "name": "courier" }));
//! let mut response = courier::post("https://httpbin.org/post", Some(options)).await?;
//! assert!(response.ok());
//! let echoed: serde_json::Value = response.json().await?;
//! # let _ = echoed;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

mod entry;
mod verbs;

pub use entry::Courier;
pub use verbs::{delete, get, head, options, patch, post, put, request};

pub use courier_client::error;
pub use courier_client::multipart::{DEFAULT_FILE_MIME, FileUpload, Form};
pub use courier_client::operations::{
    DeleteOperation, DownloadOperation, GetOperation, HeadOperation, HttpOperation,
    OptionsOperation, PatchOperation, PostOperation, PutOperation,
};
pub use courier_client::redirect::{Action, HopLimit, RedirectPolicy, SentRequest};
pub use courier_client::{
    CancellationToken, ClientStatsSnapshot, DEFAULT_REDIRECT_LIMIT, DEFAULT_USER_AGENT, Error,
    HttpClient, HttpClientBuilder, HttpError, HttpResponse, Kind, RedirectDefaults,
    RequestOptions, Result, Url, default_sensitive_headers, redirect_defaults,
    set_redirect_defaults,
};
