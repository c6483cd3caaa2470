//! HTTP client, its builder, statistics and the request dispatcher

pub mod configuration;
pub mod core;
pub mod execute;
mod guard;
pub mod stats;

pub use configuration::HttpClientBuilder;
pub use core::HttpClient;
pub use execute::send_request;
pub(crate) use guard::CallGuard;
pub use stats::{ClientStats, ClientStatsSnapshot};
