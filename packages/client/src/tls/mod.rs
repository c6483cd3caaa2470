//! TLS client configuration
//!
//! Verifying configurations trust the webpki root set and are built once per
//! process; the insecure variant is built on demand.

mod errors;
mod verifier;

use std::sync::{Arc, OnceLock};

use rustls::{ClientConfig, RootCertStore};

pub use errors::TlsError;
use verifier::AcceptAnyServerCert;

static VERIFYING_CONFIG: OnceLock<Arc<ClientConfig>> = OnceLock::new();

/// rustls client configuration for the transport.
///
/// # Errors
///
/// Returns `TlsError` if the crypto provider rejects the default protocol
/// versions or no root certificates are available.
pub fn client_config(insecure_skip_verify: bool) -> Result<Arc<ClientConfig>, TlsError> {
    if insecure_skip_verify {
        return insecure_config();
    }

    if let Some(config) = VERIFYING_CONFIG.get() {
        return Ok(config.clone());
    }

    let config = verifying_config()?;
    Ok(VERIFYING_CONFIG.get_or_init(|| config).clone())
}

fn provider() -> Arc<rustls::crypto::CryptoProvider> {
    Arc::new(rustls::crypto::ring::default_provider())
}

fn verifying_config() -> Result<Arc<ClientConfig>, TlsError> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    if roots.is_empty() {
        return Err(TlsError::EmptyRootStore);
    }

    let config = ClientConfig::builder_with_provider(provider())
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Arc::new(config))
}

fn insecure_config() -> Result<Arc<ClientConfig>, TlsError> {
    let provider = provider();
    let config = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert::new(provider)))
        .with_no_client_auth();
    Ok(Arc::new(config))
}
