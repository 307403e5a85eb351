// TLS module
// Loads the PEM certificate chain and key into a rustls acceptor

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

use crate::config::TlsConfig;
use crate::error::ConfigError;

/// Build the acceptor, or `None` when TLS is not configured
pub fn load_tls_acceptor(config: &TlsConfig) -> Result<Option<TlsAcceptor>, ConfigError> {
    let (cert_path, key_path) = match (&config.cert_file, &config.key_file) {
        (None, None) => return Ok(None),
        (Some(cert), Some(key)) => (cert, key),
        (Some(_), None) => return Err(ConfigError::MissingTlsMaterial("tls.key_file")),
        (None, Some(_)) => return Err(ConfigError::MissingTlsMaterial("tls.cert_file")),
    };

    let certs = load_certs(cert_path)?;
    let key = load_key(key_path)?;

    let mut server_config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| invalid(cert_path, e))?;
    server_config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(Some(TlsAcceptor::from(Arc::new(server_config))))
}

fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>, ConfigError> {
    let file = File::open(path).map_err(|e| invalid(path, e))?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(path, e))?;

    if certs.is_empty() {
        return Err(invalid(path, "no certificates found"));
    }
    Ok(certs)
}

fn load_key(path: &str) -> Result<PrivateKeyDer<'static>, ConfigError> {
    let file = File::open(path).map_err(|e| invalid(path, e))?;
    rustls_pemfile::private_key(&mut BufReader::new(file))
        .map_err(|e| invalid(path, e))?
        .ok_or_else(|| invalid(path, "no private key found"))
}

fn invalid(path: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidTlsMaterial {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
