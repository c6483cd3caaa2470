//! DELETE operation

use std::future::Future;

use http::Method;

use crate::client::send_request;
use crate::config::RequestOptions;
use crate::error::Result;
use crate::http::HttpResponse;
use crate::operations::HttpOperation;

#[derive(Debug)]
pub struct DeleteOperation {
    url: String,
    options: RequestOptions,
}

impl DeleteOperation {
    #[must_use]
    pub fn new(url: impl Into<String>, options: Option<RequestOptions>) -> Self {
        Self {
            url: url.into(),
            options: options.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.options = self.options.with_header(key, value);
        self
    }
}

impl HttpOperation for DeleteOperation {
    type Output = HttpResponse;

    fn execute(self) -> impl Future<Output = Result<HttpResponse>> + Send {
        async move { send_request(Method::DELETE, &self.url, Some(self.options)).await }
    }

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn url(&self) -> &str {
        &self.url
    }
}
