//! POST operation
//!
//! Body helpers write into the operation's [`RequestOptions`]; when several
//! body sources are set, the raw body wins, then files, then JSON, then form
//! fields.

use std::future::Future;

use bytes::Bytes;
use http::Method;
use serde::Serialize;

use crate::client::send_request;
use crate::config::RequestOptions;
use crate::error::{self, Result};
use crate::http::HttpResponse;
use crate::multipart::FileUpload;
use crate::operations::HttpOperation;

#[derive(Debug)]
pub struct PostOperation {
    url: String,
    options: RequestOptions,
}

impl PostOperation {
    #[must_use]
    pub fn new(url: impl Into<String>, options: Option<RequestOptions>) -> Self {
        Self {
            url: url.into(),
            options: options.unwrap_or_default(),
        }
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self> {
        let json = serde_json::to_value(value).map_err(error::builder)?;
        self.options = self.options.with_json(json);
        Ok(self)
    }

    /// Add a form field, urlencoded or multipart depending on `file`.
    #[must_use]
    pub fn form_field(mut self, key: &str, value: &str) -> Self {
        self.options = self.options.with_data(key, value);
        self
    }

    #[must_use]
    pub fn file(mut self, upload: FileUpload) -> Self {
        self.options = self.options.with_file(upload);
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.options = self.options.with_body(body);
        self
    }

    #[must_use]
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.options = self.options.with_header(key, value);
        self
    }
}

impl HttpOperation for PostOperation {
    type Output = HttpResponse;

    fn execute(self) -> impl Future<Output = Result<HttpResponse>> + Send {
        async move { send_request(Method::POST, &self.url, Some(self.options)).await }
    }

    fn method(&self) -> Method {
        Method::POST
    }

    fn url(&self) -> &str {
        &self.url
    }
}
