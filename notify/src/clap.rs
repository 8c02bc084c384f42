use crate::{
    dispatcher::{DispatchOptions, Order},
    notifier::{DEFAULT_ENDPOINT, NotificationType, Notifier},
};
use notify_common::sender::{
    HttpSender, HttpSenderOptions,
    provider::{
        CredentialsFile, OpenIdTokenProvider, OpenIdTokenProviderConfigArguments,
        StaticTokenProvider, TokenProvider,
    },
};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

#[derive(Debug, clap::Parser)]
#[command(next_help_heading = "Notification")]
pub struct NotifierArguments {
    /// The indexing endpoint to send notifications to
    #[arg(long, env = "INDEXING_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// The type of notification to send
    #[arg(
        id = "notification-type",
        long = "type",
        env = "NOTIFICATION_TYPE",
        value_enum,
        default_value_t
    )]
    pub notification_type: NotificationType,

    /// Sender connect timeout
    #[arg(
        id = "sender-connect-timeout",
        long,
        env = "SENDER_CONNECT_TIMEOUT",
        default_value = "10s"
    )]
    pub connect_timeout: humantime::Duration,

    /// Timeout of a single notification request
    #[arg(
        id = "sender-timeout",
        long,
        env = "SENDER_TIMEOUT",
        default_value = "10s"
    )]
    pub timeout: humantime::Duration,

    /// Additional root certificates
    #[arg(id = "sender-tls-ca-certificate", long)]
    pub additional_root_certificates: Vec<PathBuf>,

    /// Allow using TLS in an insecure mode when contacting the endpoint (DANGER!)
    #[arg(id = "sender-tls-insecure", long)]
    pub tls_insecure: bool,
}

impl NotifierArguments {
    pub async fn into_notifier(self) -> Result<Notifier, anyhow::Error> {
        let NotifierArguments {
            endpoint,
            notification_type,
            connect_timeout,
            timeout,
            additional_root_certificates,
            tls_insecure,
        } = self;

        let sender = HttpSender::new(
            HttpSenderOptions::default()
                .connect_timeout(Some(connect_timeout.into()))
                .timeout(Some(timeout.into()))
                .tls_insecure(tls_insecure)
                .additional_root_certificates(additional_root_certificates),
        )
        .await?;

        Ok(Notifier::new(sender, endpoint)
            .notification_type(notification_type)
            .timeout(timeout))
    }
}

/// The credentials for the indexing endpoint.
///
/// Only one source is used. A token takes precedence over a credentials file, which takes
/// precedence over an OpenID Connect client.
#[derive(Debug, clap::Parser)]
#[command(next_help_heading = "Credentials")]
pub struct CredentialArguments {
    /// A bearer token to use
    #[arg(long, env = "INDEXING_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// A JSON file, holding either an access token or OpenID Connect client credentials.
    /// Service account key files are not supported.
    #[arg(long, env = "INDEXING_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    #[command(flatten)]
    pub oidc: OpenIdTokenProviderConfigArguments,
}

impl CredentialArguments {
    /// Create the token provider, fails if no credentials are configured.
    ///
    /// This doesn't fetch a token yet. However, an OpenID Connect client will discover its
    /// issuer.
    pub async fn into_provider(self) -> Result<Arc<dyn TokenProvider>, anyhow::Error> {
        if let Some(token) = self.token {
            log::debug!("Using provided token");
            return Ok(Arc::new(StaticTokenProvider::from(token)));
        }

        if let Some(path) = self.credentials {
            log::debug!("Using credentials file: {}", path.display());
            return CredentialsFile::load(path).await?.into_provider().await;
        }

        if let Some(config) = self.oidc.into_config() {
            log::debug!("Using OIDC client: {}", config.client_id);
            return Ok(Arc::new(OpenIdTokenProvider::with_config(config).await?));
        }

        anyhow::bail!("Missing credentials, use --token, --credentials or --oidc-client-id")
    }
}

#[derive(Debug, clap::Parser)]
#[command(next_help_heading = "Dispatch")]
pub struct DispatchArguments {
    /// The order in which to notify URLs
    #[arg(long, env = "NOTIFY_ORDER", value_enum, default_value_t)]
    pub order: Order,

    /// The maximum number of URLs to notify in a single run
    #[arg(long, env = "NOTIFY_LIMIT")]
    pub limit: Option<usize>,
}

impl From<DispatchArguments> for DispatchOptions {
    fn from(value: DispatchArguments) -> Self {
        DispatchOptions::new().order(value.order).limit(value.limit)
    }
}
