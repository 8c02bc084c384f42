use super::{Expires, Token, TokenProvider};
use crate::sender::Error;
use std::time::Duration;

/// A provider handing out a fixed token, which cannot be refreshed.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: Token,
}

impl StaticTokenProvider {
    pub fn new(token: Token) -> Self {
        Self { token }
    }
}

impl From<String> for StaticTokenProvider {
    fn from(access_token: String) -> Self {
        Self::new(Token::new(access_token))
    }
}

#[async_trait::async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn refresh(&self) -> Result<(), Error> {
        match self.is_valid() {
            true => Ok(()),
            false => Err(Error::Expired),
        }
    }

    fn current(&self) -> Option<Token> {
        Some(self.token.clone())
    }

    fn is_valid(&self) -> bool {
        !self.token.access_token.is_empty() && !self.token.expires_before(Duration::ZERO)
    }
}
