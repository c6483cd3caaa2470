//! Download operation - GET a resource straight into a file

use std::future::Future;
use std::path::PathBuf;

use http::Method;

use crate::client::send_request;
use crate::config::RequestOptions;
use crate::error::{self, Result};
use crate::operations::HttpOperation;

/// Saves the body of a successful GET to `destination`.
///
/// A non-2xx final response is an error and leaves the destination untouched.
#[derive(Debug)]
pub struct DownloadOperation {
    url: String,
    destination: PathBuf,
    options: RequestOptions,
}

impl DownloadOperation {
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        destination: impl Into<PathBuf>,
        options: Option<RequestOptions>,
    ) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            options: options.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.options = self.options.with_header(key, value);
        self
    }
}

impl HttpOperation for DownloadOperation {
    /// Bytes written to the destination.
    type Output = u64;

    fn execute(self) -> impl Future<Output = Result<u64>> + Send {
        async move {
            let mut response = send_request(Method::GET, &self.url, Some(self.options)).await?;
            if !response.ok() {
                let status = response.status();
                let url = response.url().clone();
                response.close();
                return Err(
                    error::request(format!("download failed with status {status}")).with_url(url)
                );
            }
            response.download_to_file(&self.destination).await
        }
    }

    fn method(&self) -> Method {
        Method::GET
    }

    fn url(&self) -> &str {
        &self.url
    }
}
