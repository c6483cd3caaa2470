//! # courier_client
//!
//! Verb-named HTTP calls over a pooled hyper client, with a redirect policy
//! that limits chain length and keeps sensitive headers off redirected hops.
//!
//! ```no_run
//! use courier_client::{RequestOptions, get};
//!
//! # async fn run() -> courier_client::Result<()> {
//! let options = RequestOptions::new()
//!     .with_header("X-Trace", "abc")
//!     .with_redirect_limit(5);
//! let mut response = get("https://example.com/", Some(options)).await?;
//! println!("{} {}", response.status(), response.text().await?);
//! # Ok(())
//! # }
//! ```
//!
//! Every call without [`RequestOptions::http_client`] gets its own client, so
//! its redirect policy is always the one built from its options. A supplied
//! client keeps the first policy ever installed on it.

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
mod connect;
pub mod error;
pub mod http;
pub mod multipart;
pub mod operations;
pub mod redirect;
pub mod tls;

pub mod prelude;

pub use crate::prelude::*;
pub use client::send_request;
pub use operations::{delete, get, head, options, patch, post, put};
