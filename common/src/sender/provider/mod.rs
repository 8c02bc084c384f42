//! Providers of access tokens
//!
//! A [`TokenProvider`] hands out the current bearer token without performing any I/O. Fetching a
//! fresh token is an explicit, separate step ([`TokenProvider::refresh`]), so that it can be
//! performed once, before a batch of requests starts reading the token concurrently.

mod bearer;
mod expires;
mod file;
mod inject;
mod openid;

pub use self::openid::*;
pub use bearer::*;
pub use expires::*;
pub use file::*;
pub use inject::*;

use super::Error;
use chrono::{DateTime, Utc};
use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// An access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Token {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    pub fn with_expires_at(mut self, expires_at: impl Into<Option<DateTime<Utc>>>) -> Self {
        self.expires_at = expires_at.into();
        self
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A source of access tokens, shared between all concurrent requests.
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    /// Ensure a currently valid token is present, fetching a fresh one if required.
    async fn refresh(&self) -> Result<(), Error>;

    /// The current token, if any.
    fn current(&self) -> Option<Token>;

    /// Check if the current token is present and can still be used.
    fn is_valid(&self) -> bool;
}

#[async_trait::async_trait]
impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    async fn refresh(&self) -> Result<(), Error> {
        self.as_ref().refresh().await
    }

    fn current(&self) -> Option<Token> {
        self.as_ref().current()
    }

    fn is_valid(&self) -> bool {
        self.as_ref().is_valid()
    }
}
