//! PUT operation

use std::future::Future;

use bytes::Bytes;
use http::Method;
use serde::Serialize;

use crate::client::send_request;
use crate::config::RequestOptions;
use crate::error::{self, Result};
use crate::http::HttpResponse;
use crate::operations::HttpOperation;

#[derive(Debug)]
pub struct PutOperation {
    url: String,
    options: RequestOptions,
}

impl PutOperation {
    #[must_use]
    pub fn new(url: impl Into<String>, options: Option<RequestOptions>) -> Self {
        Self {
            url: url.into(),
            options: options.unwrap_or_default(),
        }
    }

    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self> {
        let json = serde_json::to_value(value).map_err(error::builder)?;
        self.options = self.options.with_json(json);
        Ok(self)
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

impl HttpOperation for PutOperation {
    type Output = HttpResponse;

    fn execute(self) -> impl Future<Output = Result<HttpResponse>> + Send {
        async move { send_request(Method::PUT, &self.url, Some(self.options)).await }
    }

    fn method(&self) -> Method {
        Method::PUT
    }

    fn url(&self) -> &str {
        &self.url
    }
}
