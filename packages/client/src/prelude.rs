//! Types most callers need.

pub use crate::client::{ClientStatsSnapshot, HttpClient, HttpClientBuilder};
pub use crate::config::{
    DEFAULT_REDIRECT_LIMIT, DEFAULT_USER_AGENT, RedirectDefaults, RequestOptions,
    default_sensitive_headers, redirect_defaults, set_redirect_defaults,
};
pub use crate::error::{Error, HttpError, Kind, Result};
pub use crate::http::HttpResponse;
pub use crate::multipart::FileUpload;
pub use crate::operations::HttpOperation;
pub use crate::redirect::{Action, RedirectPolicy, SentRequest};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};
pub use tokio_util::sync::CancellationToken;
pub use url::Url;
