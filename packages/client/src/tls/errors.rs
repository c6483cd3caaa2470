//! TLS-specific error types

/// Failures while assembling a rustls client configuration.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("Protocol version selection failed: {0}")]
    ProtocolVersions(#[from] rustls::Error),
    #[error("Root certificate store is empty")]
    EmptyRootStore,
}
