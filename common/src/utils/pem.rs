use anyhow::Context;
use reqwest::{Certificate, ClientBuilder};
use std::path::Path;

/// Add all certificates of a PEM file as trust anchors to the client.
pub fn add_cert(mut client: ClientBuilder, path: impl AsRef<Path>) -> anyhow::Result<ClientBuilder> {
    let path = path.as_ref();
    log::debug!("Adding root certificates from: {}", path.display());

    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let mut count = 0usize;
    for pem in pem::parse_many(data)? {
        let cert = Certificate::from_pem(pem::encode(&pem).as_bytes())?;
        client = client.add_root_certificate(cert);
        count += 1;
    }

    log::debug!("Added {count} certificate(s)");

    Ok(client)
}
