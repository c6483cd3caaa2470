//! Per-call request configuration
//!
//! `RequestOptions` describes everything about one outgoing call, the
//! `defaults` submodule holds the process-wide redirect fallbacks and
//! `timeouts` the transport timing defaults.

pub mod defaults;
pub mod options;
pub mod timeouts;
pub mod validation;

pub use defaults::{
    DEFAULT_REDIRECT_LIMIT, RedirectDefaults, default_sensitive_headers, redirect_defaults,
    set_redirect_defaults,
};
pub use options::{BeforeRequestHook, RequestOptions};
pub use timeouts::TimeoutConfig;
pub use validation::{ConfigResult, ConfigurationError, Validator};

/// User agent sent when the caller does not provide one.
pub const DEFAULT_USER_AGENT: &str = concat!("courier/", env!("CARGO_PKG_VERSION"));
