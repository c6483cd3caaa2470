//! HTTP request assembly, response wrapper and header helpers

pub mod compression;
pub mod headers;
pub mod request;
pub mod response;

pub use headers::{HeaderManager, basic_auth_value};
pub use request::{RequestBody, merge_params, parse_url};
pub use response::HttpResponse;
