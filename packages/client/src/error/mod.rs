pub mod classification;
pub mod constructors;
pub mod helpers;
pub mod types;

pub use constructors::*;
pub use helpers::{BadScheme, ClientClosed, OperationCanceled, TimedOut, TooManyRedirects};
pub use types::{Error, Kind, Result};

pub type HttpError = Error;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
