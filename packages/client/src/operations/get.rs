//! GET operation

use std::future::Future;

use http::Method;

use crate::client::send_request;
use crate::config::RequestOptions;
use crate::error::Result;
use crate::http::HttpResponse;
use crate::operations::HttpOperation;

#[derive(Debug)]
pub struct GetOperation {
    url: String,
    options: RequestOptions,
}

impl GetOperation {
    #[must_use]
    pub fn new(url: impl Into<String>, options: Option<RequestOptions>) -> Self {
        Self {
            url: url.into(),
            options: options.unwrap_or_default(),
        }
    }

    /// Append a query parameter; repeated keys are kept.
    #[must_use]
    pub fn query_param(mut self, key: &str, value: &str) -> Self {
        self.options = self.options.with_param(key, value);
        self
    }

    /// Add query parameters in iteration order.
    #[must_use]
    pub fn query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            self.options = self.options.with_param(key, value);
        }
        self
    }

    #[must_use]
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.options = self.options.with_header(key, value);
        self
    }
}

impl HttpOperation for GetOperation {
    type Output = HttpResponse;

    fn execute(self) -> impl Future<Output = Result<HttpResponse>> + Send {
        async move { send_request(Method::GET, &self.url, Some(self.options)).await }
    }

    fn method(&self) -> Method {
        Method::GET
    }

    fn url(&self) -> &str {
        &self.url
    }
}
