//! Notifying about a single URL

use notify_common::sender::{
    HttpSender,
    provider::{TokenInjector, TokenProvider},
};
use reqwest::{Method, StatusCode};
use std::error::Error as _;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use url::Url;

/// The publishing endpoint of the Google indexing API.
pub const DEFAULT_ENDPOINT: &str = "https://indexing.googleapis.com/v3/urlNotifications:publish";

/// The timeout a single notification call should have.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The kind of change a notification reports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// The content of the URL was added or changed.
    #[default]
    UrlUpdated,
    /// The URL was removed.
    UrlDeleted,
}

/// The request body of a notification.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Notification<'a> {
    pub url: &'a str,
    #[serde(rename = "type")]
    pub r#type: NotificationType,
}

/// The outcome of notifying about one URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The service accepted the notification.
    Succeeded,
    /// The service responded with a status other than `200`.
    ///
    /// A status of `429` signals that the quota is exhausted.
    RejectedByServer(u16),
    /// No response was received, carries the cause.
    TransportFailed(String),
}

impl NotificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl Display for NotificationOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::RejectedByServer(status) => write!(f, "rejected by server: {status}"),
            Self::TransportFailed(cause) => write!(f, "transport failed: {cause}"),
        }
    }
}

/// Sends notifications to an indexing endpoint.
///
/// Cloning is cheap, clones share the HTTP connection pool.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Notifier {
    /// The HTTP client to use
    pub sender: HttpSender,

    /// The target endpoint
    pub endpoint: Url,

    /// The type of notification to send
    pub notification_type: NotificationType,

    /// The timeout of a single notification request
    pub timeout: Duration,
}

impl Notifier {
    pub fn new(sender: HttpSender, endpoint: impl Into<Url>) -> Self {
        Self {
            sender,
            endpoint: endpoint.into(),
            notification_type: NotificationType::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: impl Into<Duration>) -> Self {
        self.timeout = timeout.into();
        self
    }

    pub fn notification_type(mut self, notification_type: NotificationType) -> Self {
        self.notification_type = notification_type;
        self
    }

    /// Notify about a single URL, performing exactly one request.
    ///
    /// The request uses the token currently held by the `credential`, it does not refresh it.
    pub async fn notify(&self, url: &str, credential: &dyn TokenProvider) -> NotificationOutcome {
        let response = self
            .sender
            .request(Method::POST, self.endpoint.clone())
            .timeout(self.timeout)
            .inject_token(credential)
            .json(&Notification {
                url,
                r#type: self.notification_type,
            })
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::OK => {
                log::debug!("Notified {url}");
                NotificationOutcome::Succeeded
            }
            Ok(response) => {
                let status = response.status();
                if status == StatusCode::TOO_MANY_REQUESTS {
                    log::warn!("Quota exceeded, notification rejected {url} -> {status}");
                } else {
                    log::warn!("Notification rejected {url} -> {status}");
                }
                NotificationOutcome::RejectedByServer(status.as_u16())
            }
            Err(err) => {
                let cause = cause(&err);
                log::warn!("Failed to notify {url}: {cause}");
                NotificationOutcome::TransportFailed(cause)
            }
        }
    }
}

/// Flatten the error chain, reqwest hides the interesting part in the sources.
fn cause(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "timeout".to_string();
    }

    let mut cause = err.to_string();
    let mut source = err.source();
    while let Some(err) = source {
        cause.push_str(": ");
        cause.push_str(&err.to_string());
        source = err.source();
    }
    cause
}
