//! HTTP Operation Modules
//!
//! One operation per verb, plus file download. Each operation owns its URL
//! and [`RequestOptions`] and is consumed by [`HttpOperation::execute`]. The
//! free functions are the short form: `get(url, None)` is
//! `GetOperation::new(url, None).execute()`.

use std::future::Future;

use http::Method;

use crate::config::RequestOptions;
use crate::error::Result;
use crate::http::HttpResponse;

pub mod delete;
pub mod download;
pub mod get;
pub mod head;
pub mod options;
pub mod patch;
pub mod post;
pub mod put;

pub use delete::DeleteOperation;
pub use download::DownloadOperation;
pub use get::GetOperation;
pub use head::HeadOperation;
pub use options::OptionsOperation;
pub use patch::PatchOperation;
pub use post::PostOperation;
pub use put::PutOperation;

/// Base trait for all HTTP operations.
pub trait HttpOperation {
    /// What a successful execution yields.
    type Output;

    /// Send the request, following redirects per the operation's options.
    fn execute(self) -> impl Future<Output = Result<Self::Output>> + Send;

    /// Get the HTTP method for this operation.
    fn method(&self) -> Method;

    /// Get the target URL for this operation.
    fn url(&self) -> &str;
}

pub async fn get(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    GetOperation::new(url, options).execute().await
}

pub async fn put(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    PutOperation::new(url, options).execute().await
}

pub async fn patch(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    PatchOperation::new(url, options).execute().await
}

pub async fn delete(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    DeleteOperation::new(url, options).execute().await
}

pub async fn post(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    PostOperation::new(url, options).execute().await
}

pub async fn head(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    HeadOperation::new(url, options).execute().await
}

pub async fn options(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    OptionsOperation::new(url, options).execute().await
}
