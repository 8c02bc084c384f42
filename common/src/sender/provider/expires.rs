use super::Token;
use chrono::Utc;
use std::time::Duration;

/// Check if something expired or expires soon.
pub trait Expires {
    /// Check if the resource expires before the duration elapsed.
    fn expires_before(&self, duration: Duration) -> bool;
}

impl Expires for openid::TemporalBearerGuard {
    fn expires_before(&self, duration: Duration) -> bool {
        match self.expires_at() {
            Some(expires) => (expires - Utc::now()).num_seconds() <= duration.as_secs() as i64,
            None => false,
        }
    }
}

impl Expires for Token {
    fn expires_before(&self, duration: Duration) -> bool {
        match self.expires_at {
            Some(expires) => (expires - Utc::now()).num_seconds() <= duration.as_secs() as i64,
            None => false,
        }
    }
}
