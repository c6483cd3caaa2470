use std::error::Error as StdError;
use std::io;

use super::helpers::{ClientClosed, OperationCanceled, TimedOut, TooManyRedirects};
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error is from a type Builder.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.kind(), Kind::Builder)
    }

    /// Returns true if the error is from the redirect policy or `Location` handling.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self.kind(), Kind::Redirect)
    }

    /// Returns true if the redirect chain reached its hop limit.
    #[must_use]
    pub fn is_redirect_limit_exceeded(&self) -> bool {
        self.is_redirect() && self.source_is::<TooManyRedirects>()
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.kind(), Kind::Timeout) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>()
                && io.kind() == io::ErrorKind::TimedOut
            {
                return true;
            }
            source = err.source();
        }

        false
    }

    /// Returns true if the call was aborted through its cancellation token.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.source_is::<OperationCanceled>()
    }

    /// Returns true if the request was refused because its client was closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.source_is::<ClientClosed>()
    }

    /// Returns true if the error is related to the request
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self.kind(), Kind::Request)
    }

    /// Returns true if the error is related to connect
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.kind(), Kind::Connect)
    }

    /// Returns true if the error is related to the request or response body
    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self.kind(), Kind::Body)
    }

    /// Returns true if the error is related to decoding the response's body
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self.kind(), Kind::Decode)
    }

    fn source_is<T: StdError + 'static>(&self) -> bool {
        let mut source = self.source();
        while let Some(err) = source {
            if err.is::<T>() {
                return true;
            }
            source = err.source();
        }
        false
    }
}
