use super::{Expires, Token, TokenProvider};
use crate::{sender::Error, utils::pem::add_cert};
use anyhow::Context;
use core::fmt::{self, Debug, Formatter};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[cfg(feature = "clap")]
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
#[command(next_help_heading = "OpenID Connect")]
pub struct OpenIdTokenProviderConfigArguments {
    /// The client ID for using Open ID connect
    #[arg(
        id = "oidc_client_id",
        long = "oidc-client-id",
        env = "OIDC_CLIENT_ID",
        requires("oidc_client_secret"),
        requires("oidc_issuer_url")
    )]
    pub client_id: Option<String>,
    /// The client secret for using Open ID connect
    #[arg(
        id = "oidc_client_secret",
        long = "oidc-client-secret",
        env = "OIDC_CLIENT_SECRET",
        requires("oidc_client_id")
    )]
    pub client_secret: Option<String>,
    /// The issuer URL for using Open ID connect
    #[arg(
        id = "oidc_issuer_url",
        long = "oidc-issuer-url",
        env = "OIDC_ISSUER_URL",
        requires("oidc_client_id")
    )]
    pub issuer_url: Option<String>,
    /// The time a token must be valid before refreshing it
    #[arg(
        id = "oidc_refresh_before",
        long = "oidc-refresh-before",
        default_value = "30s"
    )]
    pub refresh_before: humantime::Duration,
    /// Allows adding TLS in an insecure more (DANGER!)
    #[arg(
        id = "oidc_tls_insecure",
        long = "oidc-tls-insecure",
        default_value = "false"
    )]
    pub tls_insecure: bool,
    /// Allows adding additional trust anchors
    #[arg(
        id = "oidc_tls_ca_certificates",
        long = "oidc-tls-ca-certificate",
        action = clap::ArgAction::Append,
    )]
    pub tls_ca_certificates: Vec<PathBuf>,
}

#[cfg(feature = "clap")]
impl OpenIdTokenProviderConfigArguments {
    /// Convert into a configuration, `None` if no client was configured.
    pub fn into_config(self) -> Option<OpenIdTokenProviderConfig> {
        match (self.client_id, self.client_secret, self.issuer_url) {
            (Some(client_id), Some(client_secret), Some(issuer_url)) => {
                Some(OpenIdTokenProviderConfig {
                    client_id,
                    client_secret,
                    issuer_url,
                    refresh_before: self.refresh_before.into(),
                    tls_insecure: self.tls_insecure,
                    tls_ca_certificates: self.tls_ca_certificates,
                })
            }
            _ => None,
        }
    }
}

/// Configuration for the [`OpenIdTokenProvider`], using the client credentials flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenIdTokenProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub issuer_url: String,
    pub refresh_before: Duration,
    pub tls_insecure: bool,
    pub tls_ca_certificates: Vec<PathBuf>,
}

impl OpenIdTokenProviderConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        issuer_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            issuer_url: issuer_url.into(),
            refresh_before: Duration::from_secs(30),
            tls_insecure: false,
            tls_ca_certificates: vec![],
        }
    }
}

/// A provider which provides access tokens for clients.
#[derive(Clone)]
pub struct OpenIdTokenProvider {
    client: Arc<openid::Client>,
    current_token: Arc<RwLock<Option<Arc<openid::TemporalBearerGuard>>>>,
    refresh_lock: Arc<tokio::sync::Mutex<()>>,
    refresh_before: Duration,
}

impl Debug for OpenIdTokenProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenIdTokenProvider")
            .field("client", &self.client.client_id)
            .field("current_token", &"...")
            .field("refresh_before", &self.refresh_before)
            .finish()
    }
}

impl OpenIdTokenProvider {
    /// Create a new provider using the provided client.
    pub fn new(client: openid::Client, refresh_before: Duration) -> Self {
        Self {
            client: Arc::new(client),
            current_token: Arc::new(RwLock::new(None)),
            refresh_lock: Default::default(),
            refresh_before,
        }
    }

    /// Discover the issuer and create a new provider.
    ///
    /// This performs network requests to the issuer, but does not yet fetch a token.
    pub async fn with_config(config: OpenIdTokenProviderConfig) -> anyhow::Result<Self> {
        let issuer = Url::parse(&config.issuer_url).context("Parse issuer URL")?;

        let mut client = reqwest::ClientBuilder::new();

        if config.tls_insecure {
            log::warn!("Using insecure TLS when communicating with the OIDC issuer");
            client = client
                .danger_accept_invalid_hostnames(true)
                .danger_accept_invalid_certs(true);
        }

        for cert in config.tls_ca_certificates {
            client = add_cert(client, &cert)
                .with_context(|| format!("adding trust anchor: {}", cert.display()))?;
        }

        let client = openid::Client::discover_with_client(
            client.build()?,
            config.client_id,
            config.client_secret,
            None,
            issuer,
        )
        .await
        .context("Discover OIDC client")?;

        Ok(Self::new(client, config.refresh_before))
    }

    async fn fetch_fresh_token(&self) -> Result<openid::TemporalBearerGuard, openid::error::Error> {
        let current = self.current_token.read().clone();

        let next = match current {
            // if we don't have any token, fetch an initial one
            None => {
                log::debug!("Fetching initial token...");
                self.initial_token().await?
            }
            // if we have an expired one, refresh it
            Some(current) if bearer(&current).refresh_token.is_some() => {
                log::debug!("Refreshing token...");
                self.client.refresh_token(&*current, None).await?
            }
            Some(_) => {
                log::debug!("No refresh token, fetching a new one...");
                self.initial_token().await?
            }
        };

        Ok(next.into())
    }

    async fn initial_token(&self) -> Result<openid::Bearer, openid::error::Error> {
        Ok(self
            .client
            .request_token_using_client_credentials(None)
            .await?)
    }
}

fn bearer(token: &openid::TemporalBearerGuard) -> &openid::Bearer {
    token.as_ref()
}

#[async_trait::async_trait]
impl TokenProvider for OpenIdTokenProvider {
    async fn refresh(&self) -> Result<(), Error> {
        // only one refresh at a time, the others wait and re-check
        let _guard = self.refresh_lock.lock().await;

        if self.is_valid() {
            log::debug!("Token still valid");
            return Ok(());
        }

        let next_token = self.fetch_fresh_token().await?;
        log::debug!("Received token, expires at: {:?}", next_token.expires_at());
        self.current_token.write().replace(Arc::new(next_token));

        Ok(())
    }

    fn current(&self) -> Option<Token> {
        self.current_token.read().as_ref().map(|token| {
            Token::new(bearer(token).access_token.clone()).with_expires_at(token.expires_at())
        })
    }

    fn is_valid(&self) -> bool {
        match self.current_token.read().as_ref() {
            Some(token) => !token.expires_before(self.refresh_before),
            None => false,
        }
    }
}
