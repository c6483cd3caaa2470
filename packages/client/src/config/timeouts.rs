//! Transport timing defaults
//!
//! A zero `Duration` in `RequestOptions` means "use the default" for every
//! timeout below.

use std::time::Duration;

use super::options::RequestOptions;

/// Default bound on establishing the TCP connection.
pub const DIAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default TCP keep-alive interval for pooled connections.
pub const DIAL_KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Default bound on the TLS handshake.
pub const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on a whole call, every redirect hop and body read included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Resolved timeouts for one transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub dial: Duration,
    pub keep_alive: Duration,
    pub tls_handshake: Duration,
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            dial: DIAL_TIMEOUT,
            keep_alive: DIAL_KEEP_ALIVE,
            tls_handshake: TLS_HANDSHAKE_TIMEOUT,
            request: REQUEST_TIMEOUT,
        }
    }
}

impl TimeoutConfig {
    #[must_use]
    pub fn from_options(options: &RequestOptions) -> Self {
        Self {
            dial: or_default(options.dial_timeout, DIAL_TIMEOUT),
            keep_alive: or_default(options.dial_keep_alive, DIAL_KEEP_ALIVE),
            tls_handshake: or_default(options.tls_handshake_timeout, TLS_HANDSHAKE_TIMEOUT),
            request: or_default(options.request_timeout, REQUEST_TIMEOUT),
        }
    }
}

#[inline]
fn or_default(value: Duration, default: Duration) -> Duration {
    if value.is_zero() { default } else { value }
}
