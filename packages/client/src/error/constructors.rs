use super::helpers::{BadScheme, ClientClosed, OperationCanceled, TimedOut, TooManyRedirects};
use super::BoxError;
use super::types::{Error, Kind};

/// Creates an `Error` for a builder error.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a request error.
pub fn request<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Request).with(e.into())
}

/// Creates an `Error` for a redirect error.
pub fn redirect<E: Into<BoxError>>(e: E, url: url::Url) -> Error {
    Error::new(Kind::Redirect).with(e.into()).with_url(url)
}

/// Creates the `Error` returned when a redirect chain reaches its hop limit.
pub fn redirect_limit_exceeded() -> Error {
    Error::new(Kind::Redirect).with(TooManyRedirects)
}

/// Creates an `Error` for a body error.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

/// Creates an `Error` for a decode error.
pub fn decode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e.into())
}

/// Creates an `Error` for connection/connector creation failures.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for an elapsed call deadline.
pub fn timeout() -> Error {
    Error::new(Kind::Timeout).with(TimedOut)
}

/// Creates an `Error` for a call aborted through its cancellation token.
pub fn canceled() -> Error {
    Error::new(Kind::Request).with(OperationCanceled)
}

/// Creates an `Error` for a request sent through a closed client.
pub fn client_closed() -> Error {
    Error::new(Kind::Request).with(ClientClosed)
}

pub fn url_bad_scheme(url: url::Url) -> Error {
    Error::new(Kind::Builder).with(BadScheme).with_url(url)
}

pub fn invalid_url<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Maps a transport failure, keeping the transport error as the source.
pub(crate) fn transport(e: hyper_util::client::legacy::Error) -> Error {
    if e.is_connect() {
        connect(e)
    } else {
        request(e)
    }
}
