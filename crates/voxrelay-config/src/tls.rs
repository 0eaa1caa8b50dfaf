use std::path::PathBuf;

use serde::Deserialize;

/// TLS configuration for serving HTTPS
///
/// When enabled but the certificate or key file is missing, the server
/// falls back to plain HTTP instead of refusing to start.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Path to the PEM certificate chain
    pub certificate: PathBuf,
    /// Path to the PEM private key
    pub private_key: PathBuf,
}

impl TlsConfig {
    /// Whether TLS is requested and both files exist on disk
    pub fn is_usable(&self) -> bool {
        self.enabled && self.certificate.is_file() && self.private_key.is_file()
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}
