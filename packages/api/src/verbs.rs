//! Free functions, one per HTTP verb.
//!
//! `None` options are identical to `Some(RequestOptions::default())`.

use http::Method;

use courier_client::{HttpResponse, RequestOptions, Result};

#[tracing::instrument(level = "debug", skip(options))]
pub async fn get(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    courier_client::get(url, options).await
}

#[tracing::instrument(level = "debug", skip(options))]
pub async fn put(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    courier_client::put(url, options).await
}

#[tracing::instrument(level = "debug", skip(options))]
pub async fn patch(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    courier_client::patch(url, options).await
}

#[tracing::instrument(level = "debug", skip(options))]
pub async fn delete(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    courier_client::delete(url, options).await
}

#[tracing::instrument(level = "debug", skip(options))]
pub async fn post(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    courier_client::post(url, options).await
}

#[tracing::instrument(level = "debug", skip(options))]
pub async fn head(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    courier_client::head(url, options).await
}

#[tracing::instrument(level = "debug", skip(options))]
pub async fn options(url: &str, options: Option<RequestOptions>) -> Result<HttpResponse> {
    courier_client::options(url, options).await
}

/// Any method, including ones without a dedicated function.
#[tracing::instrument(level = "debug", skip(options))]
pub async fn request(
    method: Method,
    url: &str,
    options: Option<RequestOptions>,
) -> Result<HttpResponse> {
    courier_client::send_request(method, url, options).await
}
