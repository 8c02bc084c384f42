use super::{OpenIdTokenProvider, OpenIdTokenProviderConfig, StaticTokenProvider, Token, TokenProvider};
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(
        "service account key files are not supported, use an access token or OpenID Connect client credentials"
    )]
    ServiceAccount,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// The content of a JSON credentials file.
///
/// Either carries an access token directly, or the client credentials to request one from an
/// OpenID Connect issuer. Service account key files (`"type": "service_account"`) need a signed
/// JWT assertion and are rejected.
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum CredentialsFile {
    Token {
        access_token: String,
        #[serde(default)]
        expires_at: Option<DateTime<Utc>>,
    },
    ClientCredentials {
        client_id: String,
        client_secret: String,
        #[serde(alias = "token_uri")]
        issuer_url: String,
    },
}

impl CredentialsFile {
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        #[derive(serde::Deserialize)]
        struct Kind {
            #[serde(default, rename = "type")]
            kind: Option<String>,
        }

        if let Ok(Kind { kind: Some(kind) }) = serde_json::from_slice(data) {
            if kind == "service_account" {
                return Err(ParseError::ServiceAccount);
            }
        }

        Ok(serde_json::from_slice(data)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading credentials: {}", path.display()))?;

        Self::parse(&data).with_context(|| format!("parsing credentials: {}", path.display()))
    }

    pub async fn into_provider(self) -> anyhow::Result<Arc<dyn TokenProvider>> {
        Ok(match self {
            Self::Token {
                access_token,
                expires_at,
            } => Arc::new(StaticTokenProvider::new(
                Token::new(access_token).with_expires_at(expires_at),
            )),
            Self::ClientCredentials {
                client_id,
                client_secret,
                issuer_url,
            } => Arc::new(
                OpenIdTokenProvider::with_config(OpenIdTokenProviderConfig::new(
                    client_id,
                    client_secret,
                    issuer_url,
                ))
                .await?,
            ),
        })
    }
}
